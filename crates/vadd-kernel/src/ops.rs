//! The addition capability shared by all backends

use crate::error::LengthMismatch;

/// Elementwise `f32` addition over caller-provided buffers.
///
/// Implementations write `out[i] = a[i] + b[i]` for every index and must be
/// total: callers guarantee `a.len() == b.len() == out.len()` and the call
/// never fails part way through.
pub trait VectorAdd: Send + Sync {
    /// Short name used in logs (`"builtin"`, `"native"`).
    fn name(&self) -> &str;

    fn add_into(&self, a: &[f32], b: &[f32], out: &mut [f32]);
}

/// Returns the shared length of `a` and `b`, or the mismatch.
pub fn check_lengths(a: &[f32], b: &[f32]) -> Result<usize, LengthMismatch> {
    if a.len() != b.len() {
        return Err(LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_lengths_equal() {
        assert_eq!(check_lengths(&[1.0, 2.0], &[3.0, 4.0]), Ok(2));
        assert_eq!(check_lengths(&[], &[]), Ok(0));
    }

    #[test]
    fn test_check_lengths_mismatch() {
        let err = check_lengths(&[1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err, LengthMismatch { left: 2, right: 3 });
        assert!(err.to_string().starts_with("Arrays must be of the same length"));
    }
}
