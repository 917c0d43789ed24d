//! SubCategory repository.

use crate::error::MetadataResult;
use crate::models::SubCategoryRow;
use async_trait::async_trait;

/// Repository for subcategory operations.
#[async_trait]
pub trait SubCategoryRepo: Send + Sync {
    /// Insert a subcategory under a category.
    async fn create_subcategory(
        &self,
        name: &str,
        category_id: i64,
    ) -> MetadataResult<SubCategoryRow>;

    /// List all subcategories ordered by id.
    async fn list_subcategories(&self) -> MetadataResult<Vec<SubCategoryRow>>;

    /// Get a subcategory by ID.
    async fn get_subcategory(&self, id: i64) -> MetadataResult<Option<SubCategoryRow>>;

    /// Replace a subcategory's name and parent.
    async fn update_subcategory(&self, subcategory: &SubCategoryRow) -> MetadataResult<()>;

    /// Delete a subcategory.
    async fn delete_subcategory(&self, id: i64) -> MetadataResult<()>;

    /// Find a subcategory by name within a category, creating it if absent.
    async fn get_or_create_subcategory(
        &self,
        name: &str,
        category_id: i64,
    ) -> MetadataResult<(SubCategoryRow, bool)>;
}
