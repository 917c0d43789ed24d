//! Test fixtures for seeding the catalog.

use catalog_metadata::CatalogStore;
use catalog_metadata::models::{NewSku, SkuRow};

/// Ids of one seeded Location → Department → Category → SubCategory chain.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy)]
pub struct Chain {
    pub location: i64,
    pub department: i64,
    pub category: i64,
    pub subcategory: i64,
}

/// Create a full chain with the given names.
#[allow(dead_code)]
pub async fn seed_chain(
    store: &dyn CatalogStore,
    location: &str,
    department: &str,
    category: &str,
    subcategory: &str,
) -> Chain {
    let (location, _) = store.get_or_create_location(location).await.unwrap();
    let (department, _) = store
        .get_or_create_department(department, location.id)
        .await
        .unwrap();
    let (category, _) = store
        .get_or_create_category(category, department.id)
        .await
        .unwrap();
    let (subcategory, _) = store
        .get_or_create_subcategory(subcategory, category.id)
        .await
        .unwrap();

    Chain {
        location: location.id,
        department: department.id,
        category: category.id,
        subcategory: subcategory.id,
    }
}

/// Index a SKU against a seeded chain.
#[allow(dead_code)]
pub async fn seed_sku(store: &dyn CatalogStore, chain: Chain, description: &str) -> SkuRow {
    store
        .create_sku(&NewSku {
            description: description.to_string(),
            location_id: chain.location,
            department_id: chain.department,
            category_id: chain.category,
            subcategory_id: chain.subcategory,
        })
        .await
        .unwrap()
}
