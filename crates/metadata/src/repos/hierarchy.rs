//! Hierarchical lookup repository.

use crate::error::MetadataResult;
use crate::models::HierarchyNodes;
use async_trait::async_trait;
use catalog_core::HierarchyPath;

/// Read-only lookups scoped by a partial hierarchy path.
#[async_trait]
pub trait HierarchyRepo: Send + Sync {
    /// Resolve the level named by `path` and return the rows under it.
    ///
    /// Issues exactly one query. Ancestors that do not line up produce an
    /// empty result, never an error.
    async fn resolve_hierarchy(&self, path: &HierarchyPath) -> MetadataResult<HierarchyNodes>;
}
