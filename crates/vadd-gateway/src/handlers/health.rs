//! Health check endpoint
//!
//! GET /health - liveness probe. The listener is only bound after backend
//! selection, so a live process is always ready.

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use std::sync::Arc;

use crate::state::AppState;

/// GET /health
pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "vadd-gateway" })),
    )
}

/// Build the health router sub-tree
pub fn health_router() -> axum::Router<Arc<AppState>> {
    use axum::routing::get;
    axum::Router::new().route("/health", get(health))
}
