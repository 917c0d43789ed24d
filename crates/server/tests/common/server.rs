//! Server test utilities.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use catalog_core::config::{AppConfig, MetadataConfig};
use catalog_metadata::{CatalogStore, SqliteStore};
use catalog_server::{AppState, create_router};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// A test server wrapper with all dependencies.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub state: AppState,
    _temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestServer {
    /// Create a new test server backed by a temporary SQLite file.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test server with custom config modifications.
    pub async fn with_config<F>(modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");

        let db_path = temp_dir.path().join("catalog.db");
        let metadata: Arc<dyn CatalogStore> = Arc::new(
            SqliteStore::new(&db_path, None)
                .await
                .expect("Failed to create catalog store"),
        );

        let mut config = AppConfig::for_testing();
        config.metadata = MetadataConfig::Sqlite {
            path: db_path,
            query_timeout_secs: None,
        };
        modifier(&mut config);

        catalog_server::metrics::register_metrics();
        let state = AppState::new(config, metadata);
        let router = create_router(state.clone());

        Self {
            router,
            state,
            _temp_dir: temp_dir,
        }
    }

    /// Get access to the underlying store.
    pub fn metadata(&self) -> Arc<dyn CatalogStore> {
        self.state.metadata.clone()
    }

    /// Send a request with an optional JSON body and decode the JSON response.
    ///
    /// An empty response body decodes as `Value::Null`.
    pub async fn json_request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(serde_json::to_vec(&v).unwrap())
            }
            None => Body::empty(),
        };
        self.send(builder.body(body).unwrap()).await
    }

    /// Send a raw request body, for malformed-input tests.
    pub async fn raw_request(&self, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_json = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        (status, body_json)
    }
}
