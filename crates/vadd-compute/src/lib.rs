//! # vadd-compute
//!
//! Compute-dispatch core: picks one of two interchangeable addition backends
//! once at startup and serves every addition through it.
//!
//! Selection order (each path attempted exactly once):
//!
//! 1. **Accelerated**: load the prebuilt CUDA artifact, or build it with
//!    `nvcc` + the host C++ compiler when it is missing.
//! 2. **Scalar**: load or build the CPU artifact with the C++ compiler, or use
//!    the builtin Rust loop when `scalar_mode = "builtin"`.
//!
//! If both paths fail, [`BackendSelector::select`] returns
//! [`SelectionError::NoBackend`] and the caller is expected to terminate.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vadd_compute::{AdditionService, BackendSelector, ComputeConfig};
//!
//! let config = ComputeConfig::default();
//! let backend = BackendSelector::from_config(&config).select().expect("no backend");
//! let service = AdditionService::new(Arc::new(backend));
//!
//! let sum = service.add(&[1.0, 2.0, 3.0, 4.0], &[5.0, 6.0, 7.0, 8.0]).unwrap();
//! assert_eq!(sum.values, vec![6.0, 8.0, 10.0, 12.0]);
//! println!("computed by {}", sum.backend);
//! ```

pub mod artifact;
pub mod backend;
pub mod config;
pub mod error;
pub mod native;
pub mod probe;
pub mod scalar;
pub mod selector;
pub mod service;

pub use artifact::{Artifact, BuildAction, BuiltinScalarBuild, CommandBuild, CommandStep};
pub use backend::{Backend, ScalarKernel};
pub use config::{ComputeConfig, ScalarMode};
pub use error::{BuildError, LoadError, PathError, SelectionError};
pub use native::NativeKernel;
pub use probe::ToolchainReport;
pub use scalar::BuiltinKernel;
pub use selector::{BackendSelector, PathPlan};
pub use service::AdditionService;

pub use vadd_kernel::{AdditionResult, BackendKind, LengthMismatch, VectorAdd};
