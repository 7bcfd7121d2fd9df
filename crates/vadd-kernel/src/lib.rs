//! # vadd-kernel
//!
//! Core contracts shared by every vadd crate:
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`BackendKind`] | Identity of the backend that served an addition (`Accelerated` / `Scalar`). |
//! | [`AdditionResult`] | Output vector tagged with the backend that produced it. |
//! | [`VectorAdd`] | The elementwise addition capability every backend implements. |
//! | [`LengthMismatch`] | The only error an addition can report. |
//! | [`config`] | Layered configuration loading (file + `VADD_*` environment). |
//! | [`wire`] | JSON bodies of the HTTP interface. |

pub mod config;
pub mod error;
pub mod ops;
pub mod types;
pub mod wire;

pub use error::LengthMismatch;
pub use ops::{VectorAdd, check_lengths};
pub use types::{AdditionResult, BackendKind};
