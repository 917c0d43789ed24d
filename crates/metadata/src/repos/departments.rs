//! Department repository.

use crate::error::MetadataResult;
use crate::models::DepartmentRow;
use async_trait::async_trait;

/// Repository for department operations.
#[async_trait]
pub trait DepartmentRepo: Send + Sync {
    /// Insert a department under a location.
    async fn create_department(&self, name: &str, location_id: i64)
    -> MetadataResult<DepartmentRow>;

    /// List all departments ordered by id.
    async fn list_departments(&self) -> MetadataResult<Vec<DepartmentRow>>;

    /// Get a department by ID.
    async fn get_department(&self, id: i64) -> MetadataResult<Option<DepartmentRow>>;

    /// Replace a department's name and parent.
    async fn update_department(&self, department: &DepartmentRow) -> MetadataResult<()>;

    /// Delete a department and its descendants.
    async fn delete_department(&self, id: i64) -> MetadataResult<()>;

    /// Find a department by name within a location, creating it if absent.
    async fn get_or_create_department(
        &self,
        name: &str,
        location_id: i64,
    ) -> MetadataResult<(DepartmentRow, bool)>;
}
