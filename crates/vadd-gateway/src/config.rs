//! Gateway configuration
//!
//! Loaded from the file named by `VADD_CONFIG` (optional) and `VADD_*`
//! environment overrides, e.g. `VADD_SERVER__PORT=9000` or
//! `VADD_COMPUTE__SCALAR_MODE=builtin`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vadd_compute::ComputeConfig;
use vadd_kernel::config::{ConfigResult, load_layered};

/// Environment prefix for overrides
pub const ENV_PREFIX: &str = "VADD";

/// Environment variable naming the configuration file
pub const CONFIG_PATH_ENV: &str = "VADD_CONFIG";

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted request body in bytes
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_body_bytes: 16 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Full gateway configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub server: ServerConfig,
    pub compute: ComputeConfig,
}

impl GatewayConfig {
    /// Load from `VADD_CONFIG` (if set) plus environment overrides.
    pub fn load() -> ConfigResult<Self> {
        let path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        load_layered(path.as_deref(), ENV_PREFIX)
    }
}
