//! Hierarchical lookup under `/location/`.
//!
//! The path depth picks the level; the response is always an array of that
//! level's rows, carrying the parent id under the parent's field name.

use super::common::parse_id;
use crate::error::ApiResult;
use crate::metrics;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use catalog_core::{HierarchyPath, ResolvedLevel};
use catalog_metadata::models::{HierarchyNodes, NodeRow};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// One node shaped for its level.
#[derive(Debug)]
pub struct NodeResponse {
    level: ResolvedLevel,
    node: NodeRow,
}

impl Serialize for NodeResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let parent = self.level.parent_field();
        let mut map = serializer.serialize_map(Some(if parent.is_some() { 3 } else { 2 }))?;
        map.serialize_entry("id", &self.node.id)?;
        map.serialize_entry("name", &self.node.name)?;
        if let Some(field) = parent {
            map.serialize_entry(field, &self.node.parent_id)?;
        }
        map.end()
    }
}

fn shape(nodes: HierarchyNodes) -> Vec<NodeResponse> {
    let level = nodes.level;
    nodes
        .nodes
        .into_iter()
        .map(|node| NodeResponse { level, node })
        .collect()
}

async fn resolve(state: &AppState, path: HierarchyPath) -> ApiResult<Json<Vec<NodeResponse>>> {
    let nodes = state.metadata.resolve_hierarchy(&path).await?;
    metrics::record_hierarchy_lookup(nodes.level);
    tracing::debug!(level = %nodes.level, rows = nodes.nodes.len(), "Hierarchy resolved");
    Ok(Json(shape(nodes)))
}

/// GET /location/
pub async fn list_locations(State(state): State<AppState>) -> ApiResult<Json<Vec<NodeResponse>>> {
    resolve(&state, HierarchyPath::root()).await
}

/// GET /location/{location_id}/department/ and every deeper variant.
pub async fn lookup_hierarchy(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
) -> ApiResult<Json<Vec<NodeResponse>>> {
    let id = |key: &str, entity: &str| -> ApiResult<Option<i64>> {
        params
            .get(key)
            .map(|raw| parse_id(entity, raw))
            .transpose()
    };

    let path = HierarchyPath {
        location_id: id("location_id", "location")?,
        department_id: id("department_id", "department")?,
        category_id: id("category_id", "category")?,
        subcategory_id: id("subcategory_id", "subcategory")?,
    };
    resolve(&state, path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node() -> NodeRow {
        NodeRow {
            id: 4,
            name: "Frozen".to_string(),
            parent_id: Some(2),
        }
    }

    #[test]
    fn test_shape_names_parent_field_by_level() {
        let response = NodeResponse {
            level: ResolvedLevel::Category,
            node: node(),
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"id": 4, "name": "Frozen", "department": 2})
        );

        let response = NodeResponse {
            level: ResolvedLevel::SubCategory,
            node: node(),
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"id": 4, "name": "Frozen", "category": 2})
        );
    }

    #[test]
    fn test_location_has_no_parent_field() {
        let response = NodeResponse {
            level: ResolvedLevel::Location,
            node: NodeRow {
                id: 1,
                name: "East".to_string(),
                parent_id: None,
            },
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"id": 1, "name": "East"})
        );
    }
}
