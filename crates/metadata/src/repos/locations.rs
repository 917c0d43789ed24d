//! Location repository.

use crate::error::MetadataResult;
use crate::models::LocationRow;
use async_trait::async_trait;

/// Repository for location operations.
#[async_trait]
pub trait LocationRepo: Send + Sync {
    /// Insert a location and return it with its assigned id.
    async fn create_location(&self, name: &str) -> MetadataResult<LocationRow>;

    /// List all locations ordered by id.
    async fn list_locations(&self) -> MetadataResult<Vec<LocationRow>>;

    /// Get a location by ID.
    async fn get_location(&self, id: i64) -> MetadataResult<Option<LocationRow>>;

    /// Replace a location's writable fields.
    async fn update_location(&self, location: &LocationRow) -> MetadataResult<()>;

    /// Delete a location and, through cascades, everything beneath it.
    async fn delete_location(&self, id: i64) -> MetadataResult<()>;

    /// Find a location by name, creating it if absent.
    /// The flag is `true` when a row was inserted.
    async fn get_or_create_location(&self, name: &str) -> MetadataResult<(LocationRow, bool)>;
}
