//! Vector addition endpoint
//!
//! POST /add - add `array1` and `array2` elementwise

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use std::sync::Arc;
use tracing::debug;
use vadd_kernel::wire::{AddRequest, AddResponse};

use crate::error::GatewayResult;
use crate::state::AppState;

/// POST /add
///
/// Returns 400 `LENGTH_MISMATCH` when the arrays differ in length; nothing
/// is computed in that case. The kernel call may block (device round trip),
/// so it runs on the blocking pool.
pub async fn add(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AddRequest>, JsonRejection>,
) -> GatewayResult<Json<AddResponse>> {
    let Json(req) = payload?;

    let service = state.service.clone();
    let sum =
        tokio::task::spawn_blocking(move || service.add(&req.array1, &req.array2)).await??;
    debug!(len = sum.len(), backend = %sum.backend, "addition served");

    Ok(Json(AddResponse {
        result: sum.values,
        computation_mode: sum.backend,
    }))
}

/// Build the addition router sub-tree
pub fn add_router() -> axum::Router<Arc<AppState>> {
    use axum::routing::post;
    axum::Router::new().route("/add", post(add))
}
