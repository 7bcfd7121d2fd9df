//! Error types for building, loading and selecting backends

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// An external build action failed.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("{program} not found on PATH")]
    ToolchainMissing { program: String },

    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} failed with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("build finished but {} was not produced", .0.display())]
    OutputMissing(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A compiled artifact exists but could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot resolve artifact {}: {source}", .path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot open artifact {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("artifact {} does not export `{symbol}`: {source}", .path.display())]
    Symbol {
        path: PathBuf,
        symbol: &'static str,
        #[source]
        source: libloading::Error,
    },
}

/// Why one selection path (accelerated or scalar) produced no backend.
///
/// A missing artifact with building disabled and a build that ran and
/// failed are reported as distinct kinds.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("no artifact at {} and building is disabled", .0.display())]
    ArtifactMissing(PathBuf),

    #[error("path has neither an artifact location nor a build action")]
    Unconfigured,

    #[error("build failed: {0}")]
    Build(#[from] BuildError),

    #[error("load failed: {0}")]
    Load(#[from] LoadError),

    #[error("accelerated path requires a native artifact, build produced the builtin kernel")]
    NotNative,

    #[error(
        "kernel {} failed its self-check at index {index}: expected {expected}, got {actual}",
        .path.display()
    )]
    SelfCheck {
        path: PathBuf,
        index: usize,
        expected: f32,
        actual: f32,
    },
}

/// Neither backend could be brought up; the process cannot serve requests.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("no backend available: accelerated path: {accelerated}; scalar path: {scalar}")]
    NoBackend {
        accelerated: PathError,
        scalar: PathError,
    },
}
