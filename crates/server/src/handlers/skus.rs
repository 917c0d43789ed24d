//! SKU index lookup.

use crate::error::ApiResult;
use crate::metrics;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Query, State};
use catalog_metadata::models::SkuFilter;
use serde::Deserialize;

/// Query parameters for `GET /get_skus_by_meta_data/`.
#[derive(Debug, Default, Deserialize)]
pub struct SkuQuery {
    pub location: Option<String>,
    pub department: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl From<SkuQuery> for SkuFilter {
    fn from(query: SkuQuery) -> Self {
        Self {
            location: non_empty(query.location),
            department: non_empty(query.department),
            category: non_empty(query.category),
            subcategory: non_empty(query.subcategory),
        }
    }
}

/// `[sku, location, department, category, subcategory]`
pub type SkuTuple = (i64, String, String, String, String);

/// GET /get_skus_by_meta_data/
pub async fn get_skus_by_meta_data(
    State(state): State<AppState>,
    Query(query): Query<SkuQuery>,
) -> ApiResult<Json<Vec<SkuTuple>>> {
    let filter = SkuFilter::from(query);
    let rows = state.metadata.find_skus(&filter).await?;
    metrics::SKU_LOOKUPS.inc();
    tracing::debug!(?filter, rows = rows.len(), "SKU lookup");

    Ok(Json(
        rows.into_iter()
            .map(|row| {
                (
                    row.sku,
                    row.location,
                    row.department,
                    row.category,
                    row.subcategory,
                )
            })
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_parameters_are_unconstrained() {
        let filter = SkuFilter::from(SkuQuery {
            location: Some("East".to_string()),
            department: Some(String::new()),
            ..SkuQuery::default()
        });
        assert_eq!(filter.location.as_deref(), Some("East"));
        assert_eq!(filter.department, None);
        assert_eq!(filter.category, None);
    }
}
