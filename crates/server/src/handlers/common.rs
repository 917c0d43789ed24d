//! Shared handler helpers: path ids, request bodies and field readers.

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;
use axum::extract::Request;
use catalog_core::FieldErrors;
use catalog_core::validation::{
    MSG_NOT_A_STRING, MSG_NULL, MSG_REQUIRED, check_name, pk_type_message,
};
use serde_json::{Map, Value};

/// JSON object body of a write request.
pub type Body = Map<String, Value>;

/// Parse an integer id from a path segment. Only plain digits name a row.
pub fn parse_id(entity: &str, raw: &str) -> ApiResult<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::not_found(entity, raw));
    }
    raw.parse::<i64>()
        .map_err(|_| ApiError::not_found(entity, raw))
}

/// Read the request body as a JSON object.
///
/// An empty body reads as an empty object so that missing fields are
/// reported per field.
pub async fn read_body(state: &AppState, req: Request) -> ApiResult<Body> {
    let bytes = axum::body::to_bytes(req.into_body(), state.config.server.max_body_bytes)
        .await
        .map_err(|e| ApiError::BadRequest(format!("failed to read body: {e}")))?;

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ApiError::BadRequest(
            "invalid JSON: expected an object".to_string(),
        )),
        Err(e) => Err(ApiError::BadRequest(format!("invalid JSON: {e}"))),
    }
}

/// Read and check a `name` field.
///
/// Returns the name only when it passed the generic checks. With
/// `required == false` an absent field is skipped silently.
pub fn read_name(body: &Body, errors: &mut FieldErrors, required: bool) -> Option<String> {
    match body.get("name") {
        None => {
            if required {
                errors.add("name", MSG_REQUIRED);
            }
            None
        }
        Some(Value::Null) => {
            errors.add("name", MSG_NULL);
            None
        }
        Some(Value::String(name)) => check_name(errors, "name", name).then(|| name.clone()),
        Some(_) => {
            errors.add("name", MSG_NOT_A_STRING);
            None
        }
    }
}

/// Read a parent reference field as an integer id.
///
/// Existence is checked by the caller against the store.
pub fn read_pk(
    body: &Body,
    errors: &mut FieldErrors,
    field: &str,
    required: bool,
) -> Option<i64> {
    match body.get(field) {
        None => {
            if required {
                errors.add(field, MSG_REQUIRED);
            }
            None
        }
        Some(Value::Null) => {
            errors.add(field, MSG_NULL);
            None
        }
        Some(Value::Number(n)) => match n.as_i64() {
            Some(id) => Some(id),
            None => {
                errors.add(field, pk_type_message("float"));
                None
            }
        },
        Some(Value::String(s)) => match s.trim().parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => {
                errors.add(field, pk_type_message("str"));
                None
            }
        },
        Some(other) => {
            errors.add(field, pk_type_message(json_type_name(other)));
            None
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_i64() || n.is_u64() => "int",
        Value::Number(_) => "float",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Fail the request with the collected field errors, if any.
pub fn reject_invalid(entity: &str, errors: FieldErrors) -> ApiResult<()> {
    if errors.is_empty() {
        return Ok(());
    }
    metrics::record_rejection(entity);
    tracing::debug!(entity, errors = %errors, "Write rejected by validation");
    Err(ApiError::Validation(errors))
}
