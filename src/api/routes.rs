//! HTTP API route definitions.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{categorize, health, metrics_text, model_status, recommend, AppState};

/// Create the API router.
///
/// CORS is fully open (mirrored origin, credentials allowed, all methods and
/// headers), matching what the dashboard frontends expect.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/categorize", post(categorize))
        .route("/recommend", post(recommend))
        .route("/models/status", get(model_status))
        .route("/metrics", get(metrics_text))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}
