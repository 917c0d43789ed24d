//! Prometheus metrics for the catalog server.
//!
//! The `/metrics` endpoint is unauthenticated and should be reachable only
//! from the scraper's network.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use catalog_core::ResolvedLevel;
use prometheus::{self, Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::{LazyLock, Once};

/// Global Prometheus registry for all metrics.
pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

pub static HIERARCHY_LOOKUPS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "catalog_hierarchy_lookups_total",
            "Hierarchical lookups by resolved level",
        ),
        &["level"],
    )
    .expect("metric creation failed")
});

pub static ENTITY_WRITES: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "catalog_entity_writes_total",
            "Successful entity writes by entity and operation",
        ),
        &["entity", "operation"],
    )
    .expect("metric creation failed")
});

pub static VALIDATION_REJECTIONS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "catalog_validation_rejections_total",
            "Writes rejected by field validation, by entity",
        ),
        &["entity"],
    )
    .expect("metric creation failed")
});

pub static SKU_LOOKUPS: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new("catalog_sku_lookups_total", "Total SKU index lookups")
        .expect("metric creation failed")
});

static REGISTER_ONCE: Once = Once::new();

/// Register all metrics with the global registry. Safe to call more than once.
pub fn register_metrics() {
    REGISTER_ONCE.call_once(|| {
        REGISTRY
            .register(Box::new(HIERARCHY_LOOKUPS.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(ENTITY_WRITES.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(VALIDATION_REJECTIONS.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(SKU_LOOKUPS.clone()))
            .expect("metric registration failed");
    });
}

/// GET /metrics - Prometheus metrics endpoint.
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = Vec::new();
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            buffer,
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("content-type", "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {e}").into_bytes(),
        ),
    }
}

pub fn record_hierarchy_lookup(level: ResolvedLevel) {
    HIERARCHY_LOOKUPS
        .with_label_values(&[level.as_str()])
        .inc();
}

pub fn record_write(entity: &str, operation: &str) {
    ENTITY_WRITES.with_label_values(&[entity, operation]).inc();
}

pub fn record_rejection(entity: &str) {
    VALIDATION_REJECTIONS.with_label_values(&[entity]).inc();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_registration() {
        register_metrics();
        register_metrics();
    }

    #[test]
    fn test_lookup_counter_labels_by_level() {
        register_metrics();
        let before = HIERARCHY_LOOKUPS
            .with_label_values(&["category"])
            .get();
        record_hierarchy_lookup(ResolvedLevel::Category);
        assert!(
            HIERARCHY_LOOKUPS
                .with_label_values(&["category"])
                .get()
                > before
        );
    }
}
