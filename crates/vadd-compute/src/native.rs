//! Native kernels loaded from compiled artifacts
//!
//! Both artifacts export the same C entry point:
//!
//! ```c
//! void add_vectors(const float* a, const float* b, float* c, int size);
//! ```

use crate::error::LoadError;
use libloading::Library;
use std::fmt;
use std::os::raw::c_int;
use std::path::{Path, PathBuf};
use tracing::debug;
use vadd_kernel::VectorAdd;

const ADD_VECTORS: &str = "add_vectors";

/// Largest slice passed to one `add_vectors` call; longer vectors are split.
const MAX_CALL_LEN: usize = c_int::MAX as usize;

type AddVectorsFn = unsafe extern "C" fn(*const f32, *const f32, *mut f32, c_int);

/// A loaded shared library exposing `add_vectors`.
///
/// The library stays mapped for the lifetime of this value.
pub struct NativeKernel {
    path: PathBuf,
    add_vectors: AddVectorsFn,
    _library: Library,
}

impl NativeKernel {
    /// Load the artifact at `path` and resolve `add_vectors`.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        // dlopen treats bare names as search-path lookups; always pass a real path.
        let path = std::fs::canonicalize(path).map_err(|source| LoadError::Resolve {
            path: path.to_path_buf(),
            source,
        })?;

        // SAFETY: artifacts are produced by our own build actions from the
        // kernel sources; their initializers have no side effects.
        let library = unsafe { Library::new(&path) }.map_err(|source| LoadError::Open {
            path: path.clone(),
            source,
        })?;

        let add_vectors = {
            // SAFETY: the symbol type matches the C signature declared above.
            let symbol = unsafe { library.get::<AddVectorsFn>(ADD_VECTORS.as_bytes()) }
                .map_err(|source| LoadError::Symbol {
                    path: path.clone(),
                    symbol: ADD_VECTORS,
                    source,
                })?;
            *symbol
        };

        debug!(path = %path.display(), "native kernel loaded");
        Ok(Self {
            path,
            add_vectors,
            _library: library,
        })
    }

    /// Canonical path of the loaded artifact
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VectorAdd for NativeKernel {
    fn name(&self) -> &str {
        "native"
    }

    fn add_into(&self, a: &[f32], b: &[f32], out: &mut [f32]) {
        // SAFETY: `_library` keeps `add_vectors` mapped for as long as `self`.
        unsafe { call_chunked(self.add_vectors, a, b, out, MAX_CALL_LEN) }
    }
}

/// Call `f` over consecutive slices of at most `max_len` elements.
///
/// # Safety
///
/// `f` must be a valid `add_vectors` implementation and `max_len` must not
/// exceed `c_int::MAX`.
unsafe fn call_chunked(f: AddVectorsFn, a: &[f32], b: &[f32], out: &mut [f32], max_len: usize) {
    debug_assert!(a.len() == b.len() && b.len() == out.len());
    debug_assert!(max_len > 0 && max_len <= MAX_CALL_LEN);

    let chunks = a
        .chunks(max_len)
        .zip(b.chunks(max_len))
        .zip(out.chunks_mut(max_len));
    for ((a, b), out) in chunks {
        // SAFETY: all three chunks have the same length, which fits in a c_int.
        unsafe { f(a.as_ptr(), b.as_ptr(), out.as_mut_ptr(), a.len() as c_int) };
    }
}

impl fmt::Debug for NativeKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeKernel")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
