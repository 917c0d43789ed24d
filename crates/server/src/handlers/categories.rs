//! Category CRUD.
//!
//! On top of the generic field checks every write passes the configured
//! [`CategoryPolicy`](catalog_core::CategoryPolicy): alphabetic, bounded
//! names, and no placement under a reserved department.

use super::common::{Body, parse_id, read_body, read_name, read_pk, reject_invalid};
use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use catalog_core::FieldErrors;
use catalog_core::validation::missing_pk_message;
use catalog_metadata::models::CategoryRow;
use serde::Serialize;

const ENTITY: &str = "category";

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub department: i64,
}

impl From<CategoryRow> for CategoryResponse {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            department: row.department_id,
        }
    }
}

/// Fields accepted from a category write. `None` means not supplied.
#[derive(Debug, Default)]
struct CategoryChanges {
    name: Option<String>,
    department_id: Option<i64>,
}

async fn load_category(state: &AppState, raw_id: &str) -> ApiResult<CategoryRow> {
    let id = parse_id(ENTITY, raw_id)?;
    state
        .metadata
        .get_category(id)
        .await?
        .ok_or_else(|| ApiError::not_found(ENTITY, id))
}

/// Validate the supplied fields, including the policy checks that apply to them.
async fn validate_category(
    state: &AppState,
    body: &Body,
    required: bool,
) -> ApiResult<CategoryChanges> {
    let mut errors = FieldErrors::new();

    let name = read_name(body, &mut errors, required);
    if let Some(name) = &name {
        state.category_policy.check_name(&mut errors, name);
    }

    let department_id = read_pk(body, &mut errors, "department", required);
    if let Some(id) = department_id {
        match state.metadata.get_department(id).await? {
            Some(department) => state
                .category_policy
                .check_department(&mut errors, &department.name),
            None => errors.add("department", missing_pk_message(id)),
        }
    }

    reject_invalid(ENTITY, errors)?;
    Ok(CategoryChanges {
        name,
        department_id,
    })
}

/// GET /category/
pub async fn list_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CategoryResponse>>> {
    let categories = state.metadata.list_categories().await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// POST /category/
pub async fn create_category(
    State(state): State<AppState>,
    req: Request,
) -> ApiResult<(StatusCode, Json<CategoryResponse>)> {
    let body = read_body(&state, req).await?;
    let changes = validate_category(&state, &body, true).await?;
    let (Some(name), Some(department_id)) = (changes.name, changes.department_id) else {
        return Err(ApiError::Internal(
            "validated category fields missing".to_string(),
        ));
    };

    let category = state
        .metadata
        .create_category(&name, department_id)
        .await?;
    metrics::record_write(ENTITY, "create");
    tracing::info!(
        category_id = category.id,
        department_id,
        name = %category.name,
        "Category created"
    );

    Ok((StatusCode::CREATED, Json(category.into())))
}

/// GET /category/{category_id}/
pub async fn get_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> ApiResult<Json<CategoryResponse>> {
    let category = load_category(&state, &category_id).await?;
    Ok(Json(category.into()))
}

/// PUT /category/{category_id}/
pub async fn update_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
    req: Request,
) -> ApiResult<Json<CategoryResponse>> {
    write_category(state, category_id, req, true).await
}

/// PATCH /category/{category_id}/
pub async fn patch_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
    req: Request,
) -> ApiResult<Json<CategoryResponse>> {
    write_category(state, category_id, req, false).await
}

async fn write_category(
    state: AppState,
    category_id: String,
    req: Request,
    full: bool,
) -> ApiResult<Json<CategoryResponse>> {
    let mut category = load_category(&state, &category_id).await?;
    let body = read_body(&state, req).await?;
    let changes = validate_category(&state, &body, full).await?;

    if let Some(name) = changes.name {
        category.name = name;
    }
    if let Some(department_id) = changes.department_id {
        category.department_id = department_id;
    }

    state.metadata.update_category(&category).await?;
    metrics::record_write(ENTITY, if full { "update" } else { "patch" });
    tracing::info!(
        category_id = category.id,
        department_id = category.department_id,
        name = %category.name,
        "Category updated"
    );

    Ok(Json(category.into()))
}

/// DELETE /category/{category_id}/
pub async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> ApiResult<StatusCode> {
    let category = load_category(&state, &category_id).await?;
    state.metadata.delete_category(category.id).await?;
    metrics::record_write(ENTITY, "delete");
    tracing::info!(category_id = category.id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}
