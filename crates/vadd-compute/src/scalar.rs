//! Builtin scalar kernel

use vadd_kernel::VectorAdd;

/// In-process elementwise loop. Always available, needs no artifact.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinKernel;

impl VectorAdd for BuiltinKernel {
    fn name(&self) -> &str {
        "builtin"
    }

    fn add_into(&self, a: &[f32], b: &[f32], out: &mut [f32]) {
        for ((o, x), y) in out.iter_mut().zip(a).zip(b) {
            *o = x + y;
        }
    }
}
