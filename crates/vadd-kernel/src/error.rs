//! Addition error types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Two input vectors of different lengths were passed to an addition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("Arrays must be of the same length (left: {left}, right: {right})")]
pub struct LengthMismatch {
    /// Length of the first operand
    pub left: usize,
    /// Length of the second operand
    pub right: usize,
}
