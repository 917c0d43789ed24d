//! Integration tests for the hierarchical lookup endpoint.

mod common;

use axum::http::StatusCode;
use common::{TestServer, seed_chain};
use serde_json::json;

#[tokio::test]
async fn test_root_lists_locations() {
    let server = TestServer::new().await;
    let store = server.metadata();
    let east = seed_chain(&*store, "East", "Dairy", "Milk", "Whole").await;
    let west = seed_chain(&*store, "West", "Dairy", "Milk", "Whole").await;

    let (status, body) = server.json_request("GET", "/location/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"id": east.location, "name": "East"},
            {"id": west.location, "name": "West"}
        ])
    );
}

#[tokio::test]
async fn test_empty_catalog_returns_empty_array() {
    let server = TestServer::new().await;
    let (status, body) = server.json_request("GET", "/location/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_departments_scoped_to_location() {
    let server = TestServer::new().await;
    let store = server.metadata();
    let east = seed_chain(&*store, "East", "Dairy", "Milk", "Whole").await;
    seed_chain(&*store, "West", "Frozen", "Pizza", "Thin").await;

    let uri = format!("/location/{}/department/", east.location);
    let (status, body) = server.json_request("GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{"id": east.department, "name": "Dairy", "location": east.location}])
    );
}

#[tokio::test]
async fn test_categories_require_matching_location() {
    let server = TestServer::new().await;
    let store = server.metadata();
    let east = seed_chain(&*store, "East", "Dairy", "Milk", "Whole").await;
    let west = seed_chain(&*store, "West", "Frozen", "Pizza", "Thin").await;

    let uri = format!(
        "/location/{}/department/{}/category/",
        east.location, east.department
    );
    let (status, body) = server.json_request("GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{"id": east.category, "name": "Milk", "department": east.department}])
    );

    // Department from another location: not an error, just nothing.
    let uri = format!(
        "/location/{}/department/{}/category/",
        west.location, east.department
    );
    let (status, body) = server.json_request("GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_subcategories_under_full_path() {
    let server = TestServer::new().await;
    let store = server.metadata();
    let chain = seed_chain(&*store, "East", "Dairy", "Milk", "Whole").await;
    let (skim, _) = store
        .get_or_create_subcategory("Skim", chain.category)
        .await
        .unwrap();

    let uri = format!(
        "/location/{}/department/{}/category/{}/subcategory/",
        chain.location, chain.department, chain.category
    );
    let (status, body) = server.json_request("GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"id": chain.subcategory, "name": "Whole", "category": chain.category},
            {"id": skim.id, "name": "Skim", "category": chain.category}
        ])
    );
}

#[tokio::test]
async fn test_exact_subcategory_with_ancestry() {
    let server = TestServer::new().await;
    let store = server.metadata();
    let chain = seed_chain(&*store, "East", "Dairy", "Milk", "Whole").await;

    let uri = format!(
        "/location/{}/department/{}/category/{}/subcategory/{}/",
        chain.location, chain.department, chain.category, chain.subcategory
    );
    let (status, body) = server.json_request("GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{"id": chain.subcategory, "name": "Whole", "category": chain.category}])
    );
}

#[tokio::test]
async fn test_subcategory_of_other_category_is_empty() {
    let server = TestServer::new().await;
    let store = server.metadata();
    let milk = seed_chain(&*store, "East", "Dairy", "Milk", "Whole").await;
    let cheese = seed_chain(&*store, "East", "Dairy", "Cheese", "Cheddar").await;

    let uri = format!(
        "/location/{}/department/{}/category/{}/subcategory/{}/",
        milk.location, milk.department, milk.category, cheese.subcategory
    );
    let (status, body) = server.json_request("GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_non_integer_segment_is_not_found() {
    let server = TestServer::new().await;

    let (status, body) = server
        .json_request("GET", "/location/abc/department/", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");

    let (status, _) = server
        .json_request("GET", "/location/1/department/x/category/", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_location_is_empty_not_error() {
    let server = TestServer::new().await;
    let (status, body) = server
        .json_request("GET", "/location/999/department/", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_trace_id_is_echoed() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let server = TestServer::new().await;
    let request = Request::builder()
        .uri("/location/")
        .header("x-trace-id", "trace-abc")
        .body(Body::empty())
        .unwrap();
    let response = server.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-trace-id"], "trace-abc");
}
