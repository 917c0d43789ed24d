//! Error types for the core domain.

use crate::validation::FieldErrors;
use thiserror::Error;

/// Core domain error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
