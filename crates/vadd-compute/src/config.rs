//! Configuration for backend selection and artifact builds

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the scalar path obtains its kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarMode {
    /// Load or compile the C++ scalar artifact (`add_cpu.cpp`)
    #[default]
    Compile,
    /// Use the in-process Rust loop; needs no toolchain
    Builtin,
}

/// Compute configuration, loaded from the `[compute]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputeConfig {
    /// Directory compiled artifacts are probed in and written to
    pub artifact_dir: PathBuf,

    /// Directory holding `cuda_add.cu`, `add_cuda_bridge.cpp` and `add_cpu.cpp`
    pub kernel_dir: PathBuf,

    /// File name of the accelerated artifact inside `artifact_dir`
    pub accelerated_artifact: PathBuf,

    /// File name of the scalar artifact inside `artifact_dir`
    pub scalar_artifact: PathBuf,

    /// Run the build actions when an artifact is missing.
    /// When false, a missing artifact fails its path immediately.
    pub build_on_missing: bool,

    pub scalar_mode: ScalarMode,

    /// CUDA compiler
    pub nvcc: String,

    /// Host C++ compiler
    pub cxx: String,

    /// Target GPU architecture passed to nvcc as `-arch` (e.g. `sm_86`).
    /// If None, nvcc picks its default.
    pub cuda_arch: Option<String>,
}

impl Default for ComputeConfig {
    fn default() -> Self {
        Self {
            artifact_dir: PathBuf::from("."),
            kernel_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/kernels")),
            accelerated_artifact: PathBuf::from("libadd_cuda.so"),
            scalar_artifact: PathBuf::from("libadd_cpu.so"),
            build_on_missing: true,
            scalar_mode: ScalarMode::Compile,
            nvcc: String::from("nvcc"),
            cxx: String::from("g++"),
            cuda_arch: None,
        }
    }
}

impl ComputeConfig {
    /// Full path of the accelerated artifact
    pub fn accelerated_path(&self) -> PathBuf {
        self.artifact_dir.join(&self.accelerated_artifact)
    }

    /// Full path of the scalar artifact
    pub fn scalar_path(&self) -> PathBuf {
        self.artifact_dir.join(&self.scalar_artifact)
    }

    pub fn with_artifact_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifact_dir = dir.into();
        self
    }

    pub fn with_kernel_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.kernel_dir = dir.into();
        self
    }

    pub fn with_scalar_mode(mut self, mode: ScalarMode) -> Self {
        self.scalar_mode = mode;
        self
    }

    pub fn with_build_on_missing(mut self, enabled: bool) -> Self {
        self.build_on_missing = enabled;
        self
    }

    /// Override the CUDA compiler
    pub fn with_nvcc(mut self, nvcc: impl Into<String>) -> Result<Self, &'static str> {
        let nvcc = nvcc.into();
        if nvcc.trim().is_empty() {
            return Err("nvcc must not be empty");
        }
        self.nvcc = nvcc;
        Ok(self)
    }

    /// Override the host C++ compiler
    pub fn with_cxx(mut self, cxx: impl Into<String>) -> Result<Self, &'static str> {
        let cxx = cxx.into();
        if cxx.trim().is_empty() {
            return Err("cxx must not be empty");
        }
        self.cxx = cxx;
        Ok(self)
    }
}
