//! Backend identity and addition results

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two interchangeable backends handled an addition.
///
/// Serialized as `"Accelerated"` / `"Scalar"`, the same strings reported to
/// HTTP callers as `computation_mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackendKind {
    /// GPU kernel loaded from the accelerated artifact
    Accelerated,
    /// CPU kernel, either a compiled artifact or the builtin loop
    Scalar,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Accelerated => "Accelerated",
            BackendKind::Scalar => "Scalar",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of a successful addition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionResult {
    /// `values[i] == a[i] + b[i]`
    pub values: Vec<f32>,
    /// Backend that computed `values`
    pub backend: BackendKind,
}

impl AdditionResult {
    pub fn new(values: Vec<f32>, backend: BackendKind) -> Self {
        Self { values, backend }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
