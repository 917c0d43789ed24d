//! Route configuration.

use crate::handlers;
use crate::metrics::metrics_handler;
use crate::state::AppState;
use crate::trace::trace_id_middleware;
use axum::Router;
use axum::middleware;
use axum::routing::get;
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let hierarchy_routes = Router::new()
        .route(
            "/location/",
            get(handlers::list_locations).post(handlers::create_location),
        )
        .route(
            "/location/{location_id}/",
            get(handlers::get_location)
                .put(handlers::update_location)
                .patch(handlers::patch_location)
                .delete(handlers::delete_location),
        )
        .route(
            "/location/{location_id}/department/",
            get(handlers::lookup_hierarchy),
        )
        .route(
            "/location/{location_id}/department/{department_id}/category/",
            get(handlers::lookup_hierarchy),
        )
        .route(
            "/location/{location_id}/department/{department_id}/category/{category_id}/subcategory/",
            get(handlers::lookup_hierarchy),
        )
        .route(
            "/location/{location_id}/department/{department_id}/category/{category_id}/subcategory/{subcategory_id}/",
            get(handlers::lookup_hierarchy),
        );

    let entity_routes = Router::new()
        .route(
            "/departments/",
            get(handlers::list_departments).post(handlers::create_department),
        )
        .route(
            "/departments/{pk}/",
            get(handlers::get_department)
                .put(handlers::update_department)
                .delete(handlers::delete_department),
        )
        .route(
            "/category/",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/category/{category_id}/",
            get(handlers::get_category)
                .put(handlers::update_category)
                .patch(handlers::patch_category)
                .delete(handlers::delete_category),
        )
        .route(
            "/subcategory/",
            get(handlers::list_subcategories).post(handlers::create_subcategory),
        )
        .route(
            "/subcategory/{pk}/",
            get(handlers::get_subcategory)
                .put(handlers::update_subcategory)
                .delete(handlers::delete_subcategory),
        )
        .route(
            "/get_skus_by_meta_data/",
            get(handlers::get_skus_by_meta_data),
        )
        // Health check (unauthenticated, for load balancers/k8s probes)
        .route("/health", get(handlers::health_check));

    let mut router = Router::new().merge(hierarchy_routes).merge(entity_routes);

    // When enabled, /metrics should be network-restricted to the scraper.
    if state.config.server.metrics_enabled {
        router = router.route("/metrics", get(metrics_handler));
    }

    // Order of execution: TraceLayer -> trace id -> handler
    router
        .layer(middleware::from_fn(trace_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
