//! SKU index repository.

use crate::error::MetadataResult;
use crate::models::{NewSku, SkuFilter, SkuLookupRow, SkuRow};
use async_trait::async_trait;

/// Repository for the denormalized SKU index.
#[async_trait]
pub trait SkuRepo: Send + Sync {
    /// Insert a SKU row.
    ///
    /// Fails with [`MetadataError::Constraint`](crate::MetadataError::Constraint)
    /// unless subcategory → category → department → location form one chain.
    async fn create_sku(&self, sku: &NewSku) -> MetadataResult<SkuRow>;

    /// Get a SKU row by its key.
    async fn get_sku(&self, sku: i64) -> MetadataResult<Option<SkuRow>>;

    /// Count all SKU rows.
    async fn count_skus(&self) -> MetadataResult<u64>;

    /// Exact, case-sensitive name match on every dimension the filter sets.
    async fn find_skus(&self, filter: &SkuFilter) -> MetadataResult<Vec<SkuLookupRow>>;
}
