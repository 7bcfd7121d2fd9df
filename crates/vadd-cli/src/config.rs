//! CLI configuration
//!
//! Same layout as the gateway's `[compute]` section, so one file can drive
//! both `vadd build` and `vadd-gateway`. Environment overrides use the same
//! `VADD_` prefix.

use serde::Deserialize;
use std::path::Path;
use vadd_compute::ComputeConfig;
use vadd_kernel::config::{ConfigResult, load_layered};

const ENV_PREFIX: &str = "VADD";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub compute: ComputeConfig,
}

impl CliConfig {
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        load_layered(path, ENV_PREFIX)
    }
}
