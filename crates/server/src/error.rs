//! API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog_core::FieldErrors;
use catalog_metadata::MetadataError;
use serde::Serialize;

/// API error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    /// Rejected write; the body is the field error map itself.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("metadata error: {0}")]
    Metadata(MetadataError),
}

impl ApiError {
    /// Missing entity by id. Every entity uses this one shape.
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{entity} {id}"))
    }

    /// Get the error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::BadRequest(_) => "bad_request",
            Self::Validation(_) => "validation_error",
            Self::Conflict(_) => "conflict",
            Self::Internal(_) => "internal_error",
            Self::Metadata(_) => "metadata_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Metadata(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<MetadataError> for ApiError {
    fn from(e: MetadataError) -> Self {
        match e {
            MetadataError::NotFound(msg) => Self::NotFound(msg),
            MetadataError::Constraint(msg) => Self::Conflict(msg),
            other => Self::Metadata(other),
        }
    }
}

impl From<catalog_core::Error> for ApiError {
    fn from(e: catalog_core::Error) -> Self {
        match e {
            catalog_core::Error::Validation(errors) => Self::Validation(errors),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        match self {
            Self::Validation(errors) => (status, Json(errors)).into_response(),
            other => {
                let body = ErrorResponse {
                    code: other.code().to_string(),
                    message: other.to_string(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_not_found_is_api_not_found() {
        let err: ApiError = MetadataError::NotFound("location 3".to_string()).into();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_constraint_is_conflict() {
        let err: ApiError = MetadataError::Constraint("chain".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_core_validation_keeps_field_map() {
        let mut errors = FieldErrors::new();
        errors.add("name", "This field is required.");
        let err: ApiError = catalog_core::Error::Validation(errors.clone()).into();
        match err {
            ApiError::Validation(inner) => assert_eq!(inner, errors),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_not_found_message() {
        let err = ApiError::not_found("department", 7);
        assert_eq!(err.to_string(), "not found: department 7");
        assert_eq!(err.code(), "not_found");
    }
}
