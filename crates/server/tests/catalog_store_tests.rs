//! Integration tests for the catalog store: cascades, get-or-create and SKU ancestry.

mod common;

use catalog_metadata::MetadataError;
use catalog_metadata::models::NewSku;
use common::{TestServer, seed_chain, seed_sku};

#[tokio::test]
async fn test_delete_location_cascades_to_all_descendants() {
    let server = TestServer::new().await;
    let store = server.metadata();

    let (east, _) = store.get_or_create_location("East").await.unwrap();
    let kept = seed_chain(&*store, "West", "Dairy", "Milk", "Whole").await;
    seed_sku(&*store, kept, "SKUDESC0").await;

    const DEPARTMENTS: usize = 3;
    const CATEGORIES: usize = 4;
    for d in 0..DEPARTMENTS {
        let department = store
            .create_department(&format!("Dept{d}"), east.id)
            .await
            .unwrap();
        for c in 0..CATEGORIES {
            let category = store
                .create_category(&format!("Cat{c}"), department.id)
                .await
                .unwrap();
            let subcategory = store
                .create_subcategory("Sub", category.id)
                .await
                .unwrap();
            store
                .create_sku(&NewSku {
                    description: format!("SKU{d}{c}"),
                    location_id: east.id,
                    department_id: department.id,
                    category_id: category.id,
                    subcategory_id: subcategory.id,
                })
                .await
                .unwrap();
        }
    }

    assert_eq!(store.list_departments().await.unwrap().len(), DEPARTMENTS + 1);
    assert_eq!(
        store.list_categories().await.unwrap().len(),
        DEPARTMENTS * CATEGORIES + 1
    );
    assert_eq!(
        store.count_skus().await.unwrap(),
        (DEPARTMENTS * CATEGORIES + 1) as u64
    );

    store.delete_location(east.id).await.unwrap();

    let departments = store.list_departments().await.unwrap();
    assert_eq!(departments.len(), 1);
    assert_eq!(departments[0].id, kept.department);
    assert_eq!(store.list_categories().await.unwrap().len(), 1);
    assert_eq!(store.list_subcategories().await.unwrap().len(), 1);
    assert_eq!(store.count_skus().await.unwrap(), 1);
}

#[tokio::test]
async fn test_delete_subcategory_removes_its_skus() {
    let server = TestServer::new().await;
    let store = server.metadata();
    let chain = seed_chain(&*store, "East", "Dairy", "Milk", "Whole").await;
    let sku = seed_sku(&*store, chain, "SKUDESC1").await;

    store.delete_subcategory(chain.subcategory).await.unwrap();

    assert!(store.get_sku(sku.sku).await.unwrap().is_none());
    assert!(store.get_category(chain.category).await.unwrap().is_some());
}

#[tokio::test]
async fn test_get_or_create_is_idempotent() {
    let server = TestServer::new().await;
    let store = server.metadata();

    let first = seed_chain(&*store, "East", "Dairy", "Milk", "Whole").await;
    let second = seed_chain(&*store, "East", "Dairy", "Milk", "Whole").await;
    assert_eq!(first.subcategory, second.subcategory);

    let (_, created) = store.get_or_create_location("East").await.unwrap();
    assert!(!created);
    assert_eq!(store.list_locations().await.unwrap().len(), 1);
    assert_eq!(store.list_subcategories().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_same_name_under_different_parents_is_distinct() {
    let server = TestServer::new().await;
    let store = server.metadata();

    let east = seed_chain(&*store, "East", "Dairy", "Milk", "Whole").await;
    let west = seed_chain(&*store, "West", "Dairy", "Milk", "Whole").await;
    assert_ne!(east.department, west.department);
    assert_eq!(store.list_departments().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_or_create_reuses_lowest_duplicate() {
    let server = TestServer::new().await;
    let store = server.metadata();

    let first = store.create_location("East").await.unwrap();
    store.create_location("East").await.unwrap();

    let (found, created) = store.get_or_create_location("East").await.unwrap();
    assert!(!created);
    assert_eq!(found.id, first.id);
}

#[tokio::test]
async fn test_sku_with_broken_chain_rejected() {
    let server = TestServer::new().await;
    let store = server.metadata();

    let east = seed_chain(&*store, "East", "Dairy", "Milk", "Whole").await;
    let west = seed_chain(&*store, "West", "Frozen", "Pizza", "Thin").await;

    let err = store
        .create_sku(&NewSku {
            description: "SKUDESC1".to_string(),
            location_id: west.location,
            department_id: east.department,
            category_id: east.category,
            subcategory_id: east.subcategory,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, MetadataError::Constraint(_)), "{err:?}");

    let err = store
        .create_sku(&NewSku {
            description: "SKUDESC2".to_string(),
            location_id: east.location,
            department_id: east.department,
            category_id: east.category,
            subcategory_id: west.subcategory,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, MetadataError::Constraint(_)), "{err:?}");

    assert_eq!(store.count_skus().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_under_missing_parent_is_constraint() {
    let server = TestServer::new().await;
    let store = server.metadata();

    let err = store.create_department("Dairy", 12345).await.unwrap_err();
    assert!(matches!(err, MetadataError::Constraint(_)), "{err:?}");
}

#[tokio::test]
async fn test_moving_sku_referenced_node_rejected() {
    let server = TestServer::new().await;
    let store = server.metadata();

    let east = seed_chain(&*store, "East", "Dairy", "Milk", "Whole").await;
    let west = seed_chain(&*store, "West", "Frozen", "Pizza", "Thin").await;
    let sku = seed_sku(&*store, east, "SKUDESC1").await;

    let mut subcategory = store.get_subcategory(east.subcategory).await.unwrap().unwrap();
    subcategory.category_id = west.category;
    let err = store.update_subcategory(&subcategory).await.unwrap_err();
    assert!(matches!(err, MetadataError::Constraint(_)), "{err:?}");

    let mut category = store.get_category(east.category).await.unwrap().unwrap();
    category.department_id = west.department;
    let err = store.update_category(&category).await.unwrap_err();
    assert!(matches!(err, MetadataError::Constraint(_)), "{err:?}");

    let mut department = store.get_department(east.department).await.unwrap().unwrap();
    department.location_id = west.location;
    let err = store.update_department(&department).await.unwrap_err();
    assert!(matches!(err, MetadataError::Constraint(_)), "{err:?}");

    // Nothing moved.
    let subcategory = store.get_subcategory(east.subcategory).await.unwrap().unwrap();
    assert_eq!(subcategory.category_id, east.category);
    let department = store.get_department(east.department).await.unwrap().unwrap();
    assert_eq!(department.location_id, east.location);
    let row = store.get_sku(sku.sku).await.unwrap().unwrap();
    assert_eq!(row.category_id, east.category);
}

#[tokio::test]
async fn test_rename_and_unreferenced_moves_still_allowed() {
    let server = TestServer::new().await;
    let store = server.metadata();

    let east = seed_chain(&*store, "East", "Dairy", "Milk", "Whole").await;
    let west = seed_chain(&*store, "West", "Frozen", "Pizza", "Thin").await;
    seed_sku(&*store, east, "SKUDESC1").await;

    let mut subcategory = store.get_subcategory(east.subcategory).await.unwrap().unwrap();
    subcategory.name = "Semi".to_string();
    store.update_subcategory(&subcategory).await.unwrap();

    let mut category = store.get_category(west.category).await.unwrap().unwrap();
    category.department_id = east.department;
    store.update_category(&category).await.unwrap();
}
