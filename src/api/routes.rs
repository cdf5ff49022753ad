use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route(
            "/products",
            get(handlers::list_products)
                .post(handlers::create_product)
                .delete(handlers::clear_products),
        )
        .route("/products/import", post(handlers::import_products))
        .route("/products/collect", post(handlers::collect_products))
        .route("/products/top", get(handlers::top_products))
        // Analysis
        .route("/statistics", get(handlers::statistics))
        .route("/recommendations", post(handlers::recommendations))
        .route("/report", get(handlers::analysis_report))
        .route("/export", get(handlers::get_export).post(handlers::write_export))
}
