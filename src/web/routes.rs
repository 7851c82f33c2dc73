//! Route definitions

use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Widget
        .route("/", get(handlers::index))
        .route("/search", get(handlers::search))
        .route("/clear", post(handlers::clear))
        // API routes
        .route("/api/search", get(handlers::api_search))
        .route("/api/test", get(handlers::api_test))
        .route("/api/submit", post(handlers::api_submit))
        .route("/stats", get(handlers::stats))
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}
