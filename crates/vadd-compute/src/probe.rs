//! Toolchain and device probe
//!
//! Reports what the build actions will find without running them. Detection
//! uses `PATH` lookups and device-node checks only.

use crate::config::ComputeConfig;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// NVIDIA kernel module device node
const NVIDIA_DEVICE: &str = "/dev/nvidia0";

/// Snapshot of the local build environment.
#[derive(Debug, Clone, Serialize)]
pub struct ToolchainReport {
    /// Resolved CUDA compiler, if found
    pub nvcc: Option<PathBuf>,
    /// Resolved host C++ compiler, if found
    pub cxx: Option<PathBuf>,
    /// Whether an NVIDIA device node is present
    pub cuda_device: bool,
    /// Whether the accelerated artifact already exists
    pub accelerated_artifact: bool,
    /// Whether the scalar artifact already exists
    pub scalar_artifact: bool,
}

impl ToolchainReport {
    pub fn detect(config: &ComputeConfig) -> Self {
        Self {
            nvcc: which::which(&config.nvcc).ok(),
            cxx: which::which(&config.cxx).ok(),
            cuda_device: Path::new(NVIDIA_DEVICE).exists(),
            accelerated_artifact: config.accelerated_path().exists(),
            scalar_artifact: config.scalar_path().exists(),
        }
    }

    /// True when the accelerated path has a chance: either the artifact is
    /// prebuilt or both compilers are present.
    pub fn accelerated_viable(&self) -> bool {
        self.accelerated_artifact || (self.nvcc.is_some() && self.cxx.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_missing_compilers() {
        let dir = tempfile::tempdir().unwrap();
        let config = ComputeConfig::default()
            .with_artifact_dir(dir.path())
            .with_nvcc("vadd-no-such-nvcc")
            .unwrap()
            .with_cxx("vadd-no-such-cxx")
            .unwrap();
        let report = ToolchainReport::detect(&config);
        assert!(report.nvcc.is_none());
        assert!(report.cxx.is_none());
        assert!(!report.accelerated_artifact);
        assert!(!report.scalar_artifact);
        assert!(!report.accelerated_viable());
    }

    #[test]
    fn test_prebuilt_artifact_is_viable() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("libadd_cuda.so"), b"").unwrap();
        let config = ComputeConfig::default()
            .with_artifact_dir(dir.path())
            .with_nvcc("vadd-no-such-nvcc")
            .unwrap();
        let report = ToolchainReport::detect(&config);
        assert!(report.accelerated_artifact);
        assert!(report.accelerated_viable());
    }
}
