//! The selected backend

use crate::native::NativeKernel;
use crate::scalar::BuiltinKernel;
use std::path::Path;
use vadd_kernel::{BackendKind, VectorAdd};

/// Kernel behind the scalar backend.
#[derive(Debug)]
pub enum ScalarKernel {
    /// Compiled CPU artifact
    Native(NativeKernel),
    /// In-process loop
    Builtin(BuiltinKernel),
}

impl VectorAdd for ScalarKernel {
    fn name(&self) -> &str {
        match self {
            ScalarKernel::Native(k) => k.name(),
            ScalarKernel::Builtin(k) => k.name(),
        }
    }

    fn add_into(&self, a: &[f32], b: &[f32], out: &mut [f32]) {
        match self {
            ScalarKernel::Native(k) => k.add_into(a, b, out),
            ScalarKernel::Builtin(k) => k.add_into(a, b, out),
        }
    }
}

/// The backend chosen once at startup.
///
/// Immutable after selection; share it behind an `Arc`.
#[derive(Debug)]
pub enum Backend {
    Accelerated(NativeKernel),
    Scalar(ScalarKernel),
}

impl Backend {
    pub fn kind(&self) -> BackendKind {
        match self {
            Backend::Accelerated(_) => BackendKind::Accelerated,
            Backend::Scalar(_) => BackendKind::Scalar,
        }
    }

    /// Artifact the kernel was loaded from; None for the builtin kernel.
    pub fn artifact(&self) -> Option<&Path> {
        match self {
            Backend::Accelerated(k) | Backend::Scalar(ScalarKernel::Native(k)) => Some(k.path()),
            Backend::Scalar(ScalarKernel::Builtin(_)) => None,
        }
    }

    pub fn builtin() -> Self {
        Backend::Scalar(ScalarKernel::Builtin(BuiltinKernel))
    }
}

impl VectorAdd for Backend {
    fn name(&self) -> &str {
        match self {
            Backend::Accelerated(k) => k.name(),
            Backend::Scalar(k) => k.name(),
        }
    }

    fn add_into(&self, a: &[f32], b: &[f32], out: &mut [f32]) {
        match self {
            Backend::Accelerated(k) => k.add_into(a, b, out),
            Backend::Scalar(k) => k.add_into(a, b, out),
        }
    }
}
