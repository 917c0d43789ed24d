//! Department CRUD.

use super::common::{Body, parse_id, read_body, read_name, read_pk, reject_invalid};
use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use catalog_core::FieldErrors;
use catalog_core::validation::missing_pk_message;
use catalog_metadata::models::DepartmentRow;
use serde::Serialize;

const ENTITY: &str = "department";

#[derive(Debug, Serialize)]
pub struct DepartmentResponse {
    pub id: i64,
    pub name: String,
    pub location: i64,
}

impl From<DepartmentRow> for DepartmentResponse {
    fn from(row: DepartmentRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            location: row.location_id,
        }
    }
}

async fn load_department(state: &AppState, raw_id: &str) -> ApiResult<DepartmentRow> {
    let id = parse_id(ENTITY, raw_id)?;
    state
        .metadata
        .get_department(id)
        .await?
        .ok_or_else(|| ApiError::not_found(ENTITY, id))
}

/// Validate a full department body, returning `(name, location_id)`.
async fn validate_department(state: &AppState, body: &Body) -> ApiResult<(String, i64)> {
    let mut errors = FieldErrors::new();
    let name = read_name(body, &mut errors, true);
    let location_id = read_pk(body, &mut errors, "location", true);

    if let Some(id) = location_id
        && state.metadata.get_location(id).await?.is_none()
    {
        errors.add("location", missing_pk_message(id));
    }
    reject_invalid(ENTITY, errors)?;

    match (name, location_id) {
        (Some(name), Some(location_id)) => Ok((name, location_id)),
        _ => Err(ApiError::Internal("validated department fields missing".to_string())),
    }
}

/// GET /departments/
pub async fn list_departments(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<DepartmentResponse>>> {
    let departments = state.metadata.list_departments().await?;
    Ok(Json(departments.into_iter().map(Into::into).collect()))
}

/// POST /departments/
pub async fn create_department(
    State(state): State<AppState>,
    req: Request,
) -> ApiResult<(StatusCode, Json<DepartmentResponse>)> {
    let body = read_body(&state, req).await?;
    let (name, location_id) = validate_department(&state, &body).await?;

    let department = state.metadata.create_department(&name, location_id).await?;
    metrics::record_write(ENTITY, "create");
    tracing::info!(
        department_id = department.id,
        location_id,
        name = %department.name,
        "Department created"
    );

    Ok((StatusCode::CREATED, Json(department.into())))
}

/// GET /departments/{pk}/
pub async fn get_department(
    State(state): State<AppState>,
    Path(pk): Path<String>,
) -> ApiResult<Json<DepartmentResponse>> {
    let department = load_department(&state, &pk).await?;
    Ok(Json(department.into()))
}

/// PUT /departments/{pk}/
pub async fn update_department(
    State(state): State<AppState>,
    Path(pk): Path<String>,
    req: Request,
) -> ApiResult<Json<DepartmentResponse>> {
    let mut department = load_department(&state, &pk).await?;
    let body = read_body(&state, req).await?;
    let (name, location_id) = validate_department(&state, &body).await?;

    department.name = name;
    department.location_id = location_id;
    state.metadata.update_department(&department).await?;
    metrics::record_write(ENTITY, "update");
    tracing::info!(department_id = department.id, location_id, "Department updated");

    Ok(Json(department.into()))
}

/// DELETE /departments/{pk}/
pub async fn delete_department(
    State(state): State<AppState>,
    Path(pk): Path<String>,
) -> ApiResult<StatusCode> {
    let department = load_department(&state, &pk).await?;
    state.metadata.delete_department(department.id).await?;
    metrics::record_write(ENTITY, "delete");
    tracing::info!(department_id = department.id, "Department deleted");
    Ok(StatusCode::NO_CONTENT)
}
