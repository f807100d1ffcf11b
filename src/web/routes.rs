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
        // API routes
        .route("/api/v1/documents", post(handlers::create_document))
        .route("/api/v1/documents/:id", get(handlers::get_document))
        .route("/api/v1/search", post(handlers::search))
        .route("/api/v1/search/llm", post(handlers::search_llm))
        // Liveness only, no dependency check
        .route("/health", get(handlers::health))
        // Add middleware
        .layer(cors)
        // Add state
        .with_state(state)
}
