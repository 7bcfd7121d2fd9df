//! Addition service

use crate::backend::Backend;
use std::sync::Arc;
use tracing::trace;
use vadd_kernel::{AdditionResult, LengthMismatch, VectorAdd, check_lengths};

/// Adds vectors through the backend selected at startup.
///
/// Stateless apart from the shared read-only backend; clones are cheap and
/// calls from different threads need no coordination.
#[derive(Debug, Clone)]
pub struct AdditionService {
    backend: Arc<Backend>,
}

impl AdditionService {
    pub fn new(backend: Arc<Backend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// `result[i] = a[i] + b[i]`, tagged with the backend identity.
    ///
    /// Mismatched lengths are rejected before any buffer is allocated.
    pub fn add(&self, a: &[f32], b: &[f32]) -> Result<AdditionResult, LengthMismatch> {
        let len = check_lengths(a, b)?;

        let mut out = vec![0.0f32; len];
        self.backend.add_into(a, b, &mut out);

        trace!(len, backend = %self.backend.kind(), "vectors added");
        Ok(AdditionResult::new(out, self.backend.kind()))
    }
}
