//! Catalog store error types.

use thiserror::Error;

/// Catalog store operation errors.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for MetadataError {
    fn from(e: std::io::Error) -> Self {
        MetadataError::Config(e.to_string())
    }
}

/// Result type for catalog store operations.
pub type MetadataResult<T> = std::result::Result<T, MetadataError>;
