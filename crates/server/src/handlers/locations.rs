//! Location CRUD.

use super::common::{parse_id, read_body, read_name, reject_invalid};
use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use catalog_core::FieldErrors;
use catalog_metadata::models::LocationRow;
use serde::Serialize;

const ENTITY: &str = "location";

#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub id: i64,
    pub name: String,
}

impl From<LocationRow> for LocationResponse {
    fn from(row: LocationRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

async fn load_location(state: &AppState, raw_id: &str) -> ApiResult<LocationRow> {
    let id = parse_id(ENTITY, raw_id)?;
    state
        .metadata
        .get_location(id)
        .await?
        .ok_or_else(|| ApiError::not_found(ENTITY, id))
}

/// POST /location/
pub async fn create_location(
    State(state): State<AppState>,
    req: Request,
) -> ApiResult<(StatusCode, Json<LocationResponse>)> {
    let body = read_body(&state, req).await?;

    let mut errors = FieldErrors::new();
    let name = read_name(&body, &mut errors, true);
    reject_invalid(ENTITY, errors)?;
    let Some(name) = name else {
        return Err(ApiError::Internal("validated name missing".to_string()));
    };

    let location = state.metadata.create_location(&name).await?;
    metrics::record_write(ENTITY, "create");
    tracing::info!(location_id = location.id, name = %location.name, "Location created");

    Ok((StatusCode::CREATED, Json(location.into())))
}

/// GET /location/{location_id}/
pub async fn get_location(
    State(state): State<AppState>,
    Path(location_id): Path<String>,
) -> ApiResult<Json<LocationResponse>> {
    let location = load_location(&state, &location_id).await?;
    Ok(Json(location.into()))
}

/// PUT /location/{location_id}/
pub async fn update_location(
    State(state): State<AppState>,
    Path(location_id): Path<String>,
    req: Request,
) -> ApiResult<Json<LocationResponse>> {
    write_location(state, location_id, req, true).await
}

/// PATCH /location/{location_id}/
pub async fn patch_location(
    State(state): State<AppState>,
    Path(location_id): Path<String>,
    req: Request,
) -> ApiResult<Json<LocationResponse>> {
    write_location(state, location_id, req, false).await
}

async fn write_location(
    state: AppState,
    location_id: String,
    req: Request,
    full: bool,
) -> ApiResult<Json<LocationResponse>> {
    let mut location = load_location(&state, &location_id).await?;
    let body = read_body(&state, req).await?;

    let mut errors = FieldErrors::new();
    let name = read_name(&body, &mut errors, full);
    reject_invalid(ENTITY, errors)?;

    if let Some(name) = name {
        location.name = name;
    }

    state.metadata.update_location(&location).await?;
    metrics::record_write(ENTITY, if full { "update" } else { "patch" });
    tracing::info!(location_id = location.id, name = %location.name, "Location updated");

    Ok(Json(location.into()))
}

/// DELETE /location/{location_id}/
///
/// Cascades to every department, category, subcategory and SKU row below it.
pub async fn delete_location(
    State(state): State<AppState>,
    Path(location_id): Path<String>,
) -> ApiResult<StatusCode> {
    let location = load_location(&state, &location_id).await?;
    state.metadata.delete_location(location.id).await?;
    metrics::record_write(ENTITY, "delete");
    tracing::info!(location_id = location.id, "Location deleted");
    Ok(StatusCode::NO_CONTENT)
}
