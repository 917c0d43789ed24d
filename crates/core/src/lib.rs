//! Core domain types for the catalog service.
//!
//! This crate defines the vocabulary shared by the store, the HTTP API and
//! the import tooling:
//! - Hierarchy paths and level resolution
//! - Field-level validation error maps
//! - Category naming and placement policy
//! - Configuration

pub mod config;
pub mod error;
pub mod hierarchy;
pub mod policy;
pub mod validation;

pub use error::{Error, Result};
pub use hierarchy::{HierarchyPath, ResolvedLevel};
pub use policy::CategoryPolicy;
pub use validation::FieldErrors;

/// Maximum length of an entity name (locations, departments, categories, subcategories).
pub const NAME_MAX_LEN: usize = 100;

/// Maximum length of a SKU index description.
pub const SKU_DESCRIPTION_MAX_LEN: usize = 50;
