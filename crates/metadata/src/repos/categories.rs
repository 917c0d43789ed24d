//! Category repository.

use crate::error::MetadataResult;
use crate::models::CategoryRow;
use async_trait::async_trait;

/// Repository for category operations.
///
/// Naming policy is enforced by callers; the store only guarantees the parent exists.
#[async_trait]
pub trait CategoryRepo: Send + Sync {
    /// Insert a category under a department.
    async fn create_category(&self, name: &str, department_id: i64) -> MetadataResult<CategoryRow>;

    /// List all categories ordered by id.
    async fn list_categories(&self) -> MetadataResult<Vec<CategoryRow>>;

    /// Get a category by ID.
    async fn get_category(&self, id: i64) -> MetadataResult<Option<CategoryRow>>;

    /// Replace a category's name and parent.
    async fn update_category(&self, category: &CategoryRow) -> MetadataResult<()>;

    /// Delete a category and its subcategories.
    async fn delete_category(&self, id: i64) -> MetadataResult<()>;

    /// Find a category by name within a department, creating it if absent.
    async fn get_or_create_category(
        &self,
        name: &str,
        department_id: i64,
    ) -> MetadataResult<(CategoryRow, bool)>;
}
