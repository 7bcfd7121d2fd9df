//! Backend selection
//!
//! Runs once at process start, before any addition is served. Each path is
//! attempted exactly once:
//!
//! ```text
//! accelerated: artifact present? ─yes─▶ load ─ok─▶ Backend::Accelerated
//!                  │no                    │err
//!                  ▼                      │
//!              build ─ok─▶ load ─ok─▶ Backend::Accelerated
//!                  │err       │err
//!                  ▼          ▼
//! scalar:      (same steps, or the builtin kernel) ─ok─▶ Backend::Scalar
//!                  │err
//!                  ▼
//!        SelectionError::NoBackend
//! ```
//!
//! "load" includes a self-check: a native kernel whose output for a known
//! input is wrong fails its path like one that cannot be opened.

use crate::artifact::{Artifact, BuildAction, BuiltinScalarBuild, CommandBuild};
use crate::backend::{Backend, ScalarKernel};
use crate::config::{ComputeConfig, ScalarMode};
use crate::error::{PathError, SelectionError};
use crate::native::NativeKernel;
use crate::probe::ToolchainReport;
use crate::scalar::BuiltinKernel;
use std::path::PathBuf;
use tracing::{info, warn};
use vadd_kernel::{BackendKind, VectorAdd};

/// Kernel produced by one selection path, before it is tagged.
enum Resolved {
    Native(NativeKernel),
    Builtin,
}

/// How one path obtains its kernel: a probe location and a build action.
pub struct PathPlan {
    kind: BackendKind,
    prebuilt: Option<PathBuf>,
    build: Option<Box<dyn BuildAction>>,
}

impl PathPlan {
    pub fn new(kind: BackendKind) -> Self {
        Self {
            kind,
            prebuilt: None,
            build: None,
        }
    }

    /// Location probed for an existing artifact
    pub fn with_prebuilt(mut self, path: impl Into<PathBuf>) -> Self {
        self.prebuilt = Some(path.into());
        self
    }

    /// Action run when no artifact is present
    pub fn with_build(mut self, action: impl BuildAction + 'static) -> Self {
        self.build = Some(Box::new(action));
        self
    }

    fn resolve(&self) -> Result<Resolved, PathError> {
        if let Some(path) = self.prebuilt.as_deref().filter(|p| p.exists()) {
            info!(backend = %self.kind, artifact = %path.display(), "using prebuilt artifact");
            return Ok(Resolved::Native(checked(NativeKernel::load(path)?)?));
        }

        let Some(action) = &self.build else {
            return Err(match &self.prebuilt {
                Some(path) => PathError::ArtifactMissing(path.clone()),
                None => PathError::Unconfigured,
            });
        };

        info!(backend = %self.kind, action = %action.describe(), "artifact missing, building");
        match action.build()? {
            Artifact::Library(path) => Ok(Resolved::Native(checked(NativeKernel::load(&path)?)?)),
            Artifact::Builtin => Ok(Resolved::Builtin),
        }
    }
}

/// Operands of the load-time self-check. No element sums to zero, so a
/// kernel that leaves its output untouched cannot pass.
const CHECK_A: [f32; 8] = [1.0, 2.0, 3.0, 4.0, -0.5, 1024.0, 1e-3, -7.25];
const CHECK_B: [f32; 8] = [5.0, 6.0, 7.0, 8.0, 0.25, 1.0, 2e-3, 3.0];

/// Run one known addition through `kernel` and compare every element.
///
/// The output starts as NaN so untouched slots never compare equal.
pub fn self_check(kernel: &dyn VectorAdd) -> Result<(), (usize, f32, f32)> {
    let mut out = [f32::NAN; CHECK_A.len()];
    kernel.add_into(&CHECK_A, &CHECK_B, &mut out);

    for (index, actual) in out.into_iter().enumerate() {
        let expected = CHECK_A[index] + CHECK_B[index];
        if actual != expected {
            return Err((index, expected, actual));
        }
    }
    Ok(())
}

fn checked(kernel: NativeKernel) -> Result<NativeKernel, PathError> {
    match self_check(&kernel) {
        Ok(()) => Ok(kernel),
        Err((index, expected, actual)) => Err(PathError::SelfCheck {
            path: kernel.path().to_path_buf(),
            index,
            expected,
            actual,
        }),
    }
}

/// Chooses the process-wide backend: accelerated first, scalar second.
pub struct BackendSelector {
    accelerated: PathPlan,
    scalar: PathPlan,
}

impl BackendSelector {
    pub fn new(accelerated: PathPlan, scalar: PathPlan) -> Self {
        Self { accelerated, scalar }
    }

    /// Wire the real build actions from configuration.
    ///
    /// With `build_on_missing = false` neither compiled path gets a build
    /// action, so a missing artifact fails its path without running any
    /// toolchain. The builtin scalar mode ignores the flag since it needs no
    /// build.
    pub fn from_config(config: &ComputeConfig) -> Self {
        let mut accelerated =
            PathPlan::new(BackendKind::Accelerated).with_prebuilt(config.accelerated_path());
        if config.build_on_missing {
            accelerated = accelerated.with_build(CommandBuild::accelerated(config));
        }

        let scalar = match config.scalar_mode {
            ScalarMode::Builtin => PathPlan::new(BackendKind::Scalar).with_build(BuiltinScalarBuild),
            ScalarMode::Compile => {
                let plan = PathPlan::new(BackendKind::Scalar).with_prebuilt(config.scalar_path());
                if config.build_on_missing {
                    plan.with_build(CommandBuild::scalar(config))
                } else {
                    plan
                }
            }
        };

        let report = ToolchainReport::detect(config);
        info!(
            nvcc = ?report.nvcc,
            cxx = ?report.cxx,
            cuda_device = report.cuda_device,
            accelerated_viable = report.accelerated_viable(),
            scalar_mode = ?config.scalar_mode,
            "toolchain probe"
        );

        Self::new(accelerated, scalar)
    }

    /// Run the selection.
    ///
    /// Blocking: may spawn compilers. Call once, before serving, from a
    /// blocking context.
    pub fn select(&self) -> Result<Backend, SelectionError> {
        let accelerated_err = match self.accelerated.resolve() {
            Ok(Resolved::Native(kernel)) => {
                info!(backend = %BackendKind::Accelerated, artifact = %kernel.path().display(), "backend selected");
                return Ok(Backend::Accelerated(kernel));
            }
            Ok(Resolved::Builtin) => PathError::NotNative,
            Err(e) => e,
        };
        warn!(error = %accelerated_err, "accelerated path failed, falling back to scalar");

        match self.scalar.resolve() {
            Ok(resolved) => {
                let kernel = match resolved {
                    Resolved::Native(kernel) => ScalarKernel::Native(kernel),
                    Resolved::Builtin => ScalarKernel::Builtin(BuiltinKernel),
                };
                let backend = Backend::Scalar(kernel);
                info!(
                    backend = %BackendKind::Scalar,
                    artifact = ?backend.artifact(),
                    "backend selected"
                );
                Ok(backend)
            }
            Err(scalar_err) => Err(SelectionError::NoBackend {
                accelerated: accelerated_err,
                scalar: scalar_err,
            }),
        }
    }
}
