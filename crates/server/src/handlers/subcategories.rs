//! SubCategory CRUD.

use super::common::{Body, parse_id, read_body, read_name, read_pk, reject_invalid};
use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use catalog_core::FieldErrors;
use catalog_core::validation::missing_pk_message;
use catalog_metadata::models::SubCategoryRow;
use serde::Serialize;

const ENTITY: &str = "subcategory";

#[derive(Debug, Serialize)]
pub struct SubCategoryResponse {
    pub id: i64,
    pub name: String,
    pub category: i64,
}

impl From<SubCategoryRow> for SubCategoryResponse {
    fn from(row: SubCategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            category: row.category_id,
        }
    }
}

async fn load_subcategory(state: &AppState, raw_id: &str) -> ApiResult<SubCategoryRow> {
    let id = parse_id(ENTITY, raw_id)?;
    state
        .metadata
        .get_subcategory(id)
        .await?
        .ok_or_else(|| ApiError::not_found(ENTITY, id))
}

async fn validate_subcategory(state: &AppState, body: &Body) -> ApiResult<(String, i64)> {
    let mut errors = FieldErrors::new();
    let name = read_name(body, &mut errors, true);
    let category_id = read_pk(body, &mut errors, "category", true);

    if let Some(id) = category_id
        && state.metadata.get_category(id).await?.is_none()
    {
        errors.add("category", missing_pk_message(id));
    }
    reject_invalid(ENTITY, errors)?;

    match (name, category_id) {
        (Some(name), Some(category_id)) => Ok((name, category_id)),
        _ => Err(ApiError::Internal(
            "validated subcategory fields missing".to_string(),
        )),
    }
}

/// GET /subcategory/
pub async fn list_subcategories(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<SubCategoryResponse>>> {
    let subcategories = state.metadata.list_subcategories().await?;
    Ok(Json(subcategories.into_iter().map(Into::into).collect()))
}

/// POST /subcategory/
pub async fn create_subcategory(
    State(state): State<AppState>,
    req: Request,
) -> ApiResult<(StatusCode, Json<SubCategoryResponse>)> {
    let body = read_body(&state, req).await?;
    let (name, category_id) = validate_subcategory(&state, &body).await?;

    let subcategory = state
        .metadata
        .create_subcategory(&name, category_id)
        .await?;
    metrics::record_write(ENTITY, "create");
    tracing::info!(
        subcategory_id = subcategory.id,
        category_id,
        name = %subcategory.name,
        "SubCategory created"
    );

    Ok((StatusCode::CREATED, Json(subcategory.into())))
}

/// GET /subcategory/{pk}/
pub async fn get_subcategory(
    State(state): State<AppState>,
    Path(pk): Path<String>,
) -> ApiResult<Json<SubCategoryResponse>> {
    let subcategory = load_subcategory(&state, &pk).await?;
    Ok(Json(subcategory.into()))
}

/// PUT /subcategory/{pk}/
pub async fn update_subcategory(
    State(state): State<AppState>,
    Path(pk): Path<String>,
    req: Request,
) -> ApiResult<Json<SubCategoryResponse>> {
    let mut subcategory = load_subcategory(&state, &pk).await?;
    let body = read_body(&state, req).await?;
    let (name, category_id) = validate_subcategory(&state, &body).await?;

    subcategory.name = name;
    subcategory.category_id = category_id;
    state.metadata.update_subcategory(&subcategory).await?;
    metrics::record_write(ENTITY, "update");
    tracing::info!(subcategory_id = subcategory.id, category_id, "SubCategory updated");

    Ok(Json(subcategory.into()))
}

/// DELETE /subcategory/{pk}/
pub async fn delete_subcategory(
    State(state): State<AppState>,
    Path(pk): Path<String>,
) -> ApiResult<StatusCode> {
    let subcategory = load_subcategory(&state, &pk).await?;
    state.metadata.delete_subcategory(subcategory.id).await?;
    metrics::record_write(ENTITY, "delete");
    tracing::info!(subcategory_id = subcategory.id, "SubCategory deleted");
    Ok(StatusCode::NO_CONTENT)
}
