//! Application state shared across handlers.

use catalog_core::CategoryPolicy;
use catalog_core::config::AppConfig;
use catalog_metadata::CatalogStore;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Catalog store.
    pub metadata: Arc<dyn CatalogStore>,
    /// Category naming and placement rules, built from `config.policy.category`.
    pub category_policy: Arc<CategoryPolicy>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Configuration is expected to have been validated by the caller.
    pub fn new(config: AppConfig, metadata: Arc<dyn CatalogStore>) -> Self {
        let category_policy = CategoryPolicy::new(&config.policy.category);
        if !config.policy.category.reserved_departments.is_empty() {
            tracing::info!(
                reserved = ?config.policy.category.reserved_departments,
                "Category placement deny-list active"
            );
        }

        Self {
            config: Arc::new(config),
            metadata,
            category_policy: Arc::new(category_policy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_metadata::SqliteStore;

    #[tokio::test]
    async fn test_policy_follows_config() {
        let temp = tempfile::tempdir().unwrap();
        let metadata: Arc<dyn CatalogStore> = Arc::new(
            SqliteStore::new(temp.path().join("catalog.db"), None)
                .await
                .unwrap(),
        );

        let mut config = AppConfig::for_testing();
        config.policy.category.reserved_departments = vec!["Deli".to_string()];

        let state = AppState::new(config, metadata);
        assert!(state.category_policy.is_reserved("Deli"));
        assert!(!state.category_policy.is_reserved("Bakery"));
    }
}
