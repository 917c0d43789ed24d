//! Catalog store abstraction and its SQLite implementation.
//!
//! This crate owns the relational data model:
//! - The Location → Department → Category → SubCategory chain with cascading deletes
//! - The denormalized SKU index and its ancestry check
//! - Per-level query plans for hierarchical lookups

pub mod error;
pub mod models;
pub mod repos;
pub mod store;

pub use error::{MetadataError, MetadataResult};
pub use store::{CatalogStore, SqliteStore};

use catalog_core::config::MetadataConfig;
use std::sync::Arc;

/// Create a catalog store from configuration.
pub async fn from_config(config: &MetadataConfig) -> MetadataResult<Arc<dyn CatalogStore>> {
    match config {
        MetadataConfig::Sqlite {
            path,
            query_timeout_secs,
        } => {
            let store = SqliteStore::new(path, *query_timeout_secs).await?;
            Ok(Arc::new(store) as Arc<dyn CatalogStore>)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::config::MetadataConfig;

    #[tokio::test]
    async fn test_from_config_sqlite() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("catalog.db");
        let config = MetadataConfig::Sqlite {
            path: db_path.clone(),
            query_timeout_secs: None,
        };

        let store = from_config(&config).await.unwrap();
        store.health_check().await.unwrap();
        assert!(db_path.exists());
    }
}
