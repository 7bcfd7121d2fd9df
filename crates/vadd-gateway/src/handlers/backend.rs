//! Backend introspection endpoint
//!
//! GET /v1/backend - which backend was selected and where it was loaded from

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;
use std::sync::Arc;
use vadd_kernel::VectorAdd;

use crate::state::AppState;

/// GET /v1/backend
pub async fn backend_info(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let backend = state.service.backend();
    Json(json!({
        "computation_mode": backend.kind(),
        "kernel": backend.name(),
        "artifact": backend.artifact().map(|p| p.display().to_string()),
    }))
}

/// Build the backend router sub-tree
pub fn backend_router() -> axum::Router<Arc<AppState>> {
    use axum::routing::get;
    axum::Router::new().route("/v1/backend", get(backend_info))
}
