//! HTTP API server for the catalog.
//!
//! This crate provides:
//! - CRUD endpoints for locations, departments, categories and subcategories
//! - The hierarchical lookup endpoint under `/location/`
//! - SKU index lookup by names
//! - Health and Prometheus metrics endpoints

pub mod error;
pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod state;
pub mod trace;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
pub use trace::TraceId;
