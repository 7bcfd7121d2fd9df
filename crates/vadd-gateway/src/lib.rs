//! `vadd-gateway`: HTTP transport for the vadd compute core.
//!
//! Startup selects the backend once (blocking, may compile artifacts), then
//! binds the listener. Every request is served by the same backend.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vadd_gateway::config::GatewayConfig;
//! use vadd_gateway::server::GatewayServer;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = GatewayConfig::load().unwrap();
//!     let backend = GatewayServer::select_backend(config.compute.clone()).await.unwrap();
//!     let server = GatewayServer::new(config.server, Arc::new(backend));
//!     server.start().await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod server;
pub mod state;

pub use config::{GatewayConfig, ServerConfig};
pub use error::{GatewayError, StartupError};
pub use server::GatewayServer;
