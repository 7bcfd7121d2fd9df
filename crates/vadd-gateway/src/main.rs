//! vadd gateway entry point
//!
//! Loads configuration, selects the compute backend (building artifacts if
//! needed) and serves the HTTP API. Exits with status 1 if no backend can be
//! brought up.
//!
//! # Environment variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `VADD_CONFIG` | *(none)* | Path to a YAML/TOML/JSON configuration file. |
//! | `VADD_SERVER__PORT` | `8000` | TCP port to listen on. |
//! | `VADD_COMPUTE__SCALAR_MODE` | `compile` | `compile` or `builtin`. |
//! | `VADD_LOG_FORMAT` | `text` | `json` for JSON log lines. |
//! | `RUST_LOG` | `vadd_gateway=info,...` | Log filter. |

use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use vadd_gateway::config::GatewayConfig;
use vadd_gateway::error::StartupError;
use vadd_gateway::server::GatewayServer;

const DEFAULT_LOG_FILTER: &str = "vadd_gateway=info,vadd_compute=info,tower_http=info";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let json = std::env::var("VADD_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        error!(error = %e, "vadd gateway failed, exiting");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = GatewayConfig::load()?;
    info!(
        bind = %config.server.bind_addr(),
        artifact_dir = %config.compute.artifact_dir.display(),
        scalar_mode = ?config.compute.scalar_mode,
        "vadd gateway configuration loaded"
    );

    let backend = GatewayServer::select_backend(config.compute.clone()).await?;
    GatewayServer::new(config.server, Arc::new(backend))
        .start()
        .await
}
