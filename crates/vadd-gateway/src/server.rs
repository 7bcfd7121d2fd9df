//! Axum-based HTTP server.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/add` | Elementwise addition of `array1` and `array2`. |
//! | `GET`  | `/health` | Liveness check, always `200 OK`. |
//! | `GET`  | `/v1/backend` | Selected backend and its artifact. |

use crate::config::ServerConfig;
use crate::error::StartupError;
use crate::handlers::{add_router, backend_router, health_router};
use crate::state::AppState;
use axum::{Router, body::Body, extract::DefaultBodyLimit, http::Request};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;
use vadd_compute::{AdditionService, Backend, BackendSelector, ComputeConfig};

/// HTTP server bound to one selected backend.
pub struct GatewayServer {
    config: ServerConfig,
    service: AdditionService,
}

impl GatewayServer {
    pub fn new(config: ServerConfig, backend: Arc<Backend>) -> Self {
        Self {
            config,
            service: AdditionService::new(backend),
        }
    }

    /// Run backend selection on the blocking pool.
    ///
    /// Selection may spawn compilers, so it stays off the async workers.
    pub async fn select_backend(compute: ComputeConfig) -> Result<Backend, StartupError> {
        let backend =
            tokio::task::spawn_blocking(move || BackendSelector::from_config(&compute).select())
                .await??;
        Ok(backend)
    }

    /// Build the axum [`Router`] with all routes and layers.
    pub fn build_app(&self) -> Router {
        let state = Arc::new(AppState::new(self.service.clone()));

        Router::new()
            .merge(health_router())
            .merge(add_router())
            .merge(backend_router())
            .layer(DefaultBodyLimit::max(self.config.max_body_bytes))
            .layer(
                TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        request_id = %Uuid::new_v4(),
                        method = %req.method(),
                        path = %req.uri().path(),
                    )
                }),
            )
            .with_state(state)
    }

    /// Bind to `host:port` and serve until the process exits.
    pub async fn start(self) -> Result<(), StartupError> {
        let app = self.build_app();
        let addr = self.config.bind_addr();
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!(
            addr = %addr,
            backend = %self.service.backend().kind(),
            "vadd gateway listening"
        );
        axum::serve(listener, app).await?;
        Ok(())
    }
}
