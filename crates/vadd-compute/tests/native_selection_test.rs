//! End-to-end selection against real compiled artifacts.
//!
//! These tests need a host C++ compiler; they return early when `g++` is not
//! on `PATH`.

use std::sync::Arc;
use vadd_compute::{
    AdditionService, Backend, BackendKind, BackendSelector, ComputeConfig, PathError, ScalarKernel,
    SelectionError,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("vadd_compute=debug")
        .with_test_writer()
        .try_init();
}

fn cxx_available() -> bool {
    if which::which("g++").is_ok() {
        return true;
    }
    eprintln!("g++ not found on PATH, skipping");
    false
}

/// Config that can never take the CUDA path on the test machine.
fn scalar_only_config(dir: &std::path::Path) -> ComputeConfig {
    ComputeConfig::default()
        .with_artifact_dir(dir)
        .with_nvcc("vadd-no-such-nvcc")
        .unwrap()
}

/// Same entry point as the real artifacts, but the body never writes `c`.
fn compile_noop_library(scratch: &std::path::Path, output: &std::path::Path) {
    let source = scratch.join("noop_add.cpp");
    std::fs::write(
        &source,
        "extern \"C\" void add_vectors(const float*, const float*, float*, int) {}\n",
    )
    .unwrap();
    let status = std::process::Command::new("g++")
        .args(["-shared", "-fPIC", "-o"])
        .arg(output)
        .arg(&source)
        .status()
        .unwrap();
    assert!(status.success());
}

#[test]
fn accelerated_build_failure_selects_compiled_scalar() {
    init_tracing();
    if !cxx_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let config = scalar_only_config(dir.path());

    let backend = BackendSelector::from_config(&config).select().unwrap();
    assert_eq!(backend.kind(), BackendKind::Scalar);
    assert!(matches!(backend, Backend::Scalar(ScalarKernel::Native(_))));
    assert!(config.scalar_path().exists(), "scalar artifact written to artifact_dir");

    let service = AdditionService::new(Arc::new(backend));
    let first = service.add(&[1.0, 2.0, 3.0, 4.0], &[5.0, 6.0, 7.0, 8.0]).unwrap();
    assert_eq!(first.values, vec![6.0, 8.0, 10.0, 12.0]);
    assert_eq!(first.backend, BackendKind::Scalar);

    // Every later call reports the same backend.
    for _ in 0..3 {
        let again = service.add(&[0.5], &[0.25]).unwrap();
        assert_eq!(again.backend, BackendKind::Scalar);
        assert_eq!(again.values, vec![0.75]);
    }

    assert!(service.add(&[1.0, 2.0], &[1.0, 2.0, 3.0]).is_err());
}

#[test]
fn prebuilt_scalar_artifact_is_loaded_without_building() {
    init_tracing();
    if !cxx_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();

    // Produce the artifact once, then select again with builds disabled.
    let config = scalar_only_config(dir.path());
    BackendSelector::from_config(&config).select().unwrap();

    let config = config.with_build_on_missing(false);
    let backend = BackendSelector::from_config(&config).select().unwrap();
    assert_eq!(backend.kind(), BackendKind::Scalar);
    let artifact = backend.artifact().expect("native scalar artifact");
    assert_eq!(artifact, std::fs::canonicalize(config.scalar_path()).unwrap());
}

#[test]
fn prebuilt_accelerated_artifact_is_preferred() {
    init_tracing();
    if !cxx_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let config = scalar_only_config(dir.path());
    BackendSelector::from_config(&config).select().unwrap();

    // Any library exporting add_vectors satisfies the accelerated contract.
    std::fs::copy(config.scalar_path(), config.accelerated_path()).unwrap();

    let backend = BackendSelector::from_config(&config).select().unwrap();
    assert_eq!(backend.kind(), BackendKind::Accelerated);

    let service = AdditionService::new(Arc::new(backend));
    let a: Vec<f32> = (0..10_000).map(|i| i as f32).collect();
    let b: Vec<f32> = (0..10_000).map(|i| -(i as f32) * 0.5).collect();
    let sum = service.add(&a, &b).unwrap();
    assert_eq!(sum.backend, BackendKind::Accelerated);
    for i in 0..a.len() {
        assert_eq!(sum.values[i], a[i] + b[i]);
    }
}

#[test]
fn accelerated_artifact_that_computes_nothing_falls_back() {
    init_tracing();
    if !cxx_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let config = scalar_only_config(dir.path());

    compile_noop_library(dir.path(), &config.accelerated_path());

    let backend = BackendSelector::from_config(&config).select().unwrap();
    assert_eq!(backend.kind(), BackendKind::Scalar);

    let service = AdditionService::new(Arc::new(backend));
    let sum = service.add(&[1.0, 2.0, 3.0, 4.0], &[5.0, 6.0, 7.0, 8.0]).unwrap();
    assert_eq!(sum.values, vec![6.0, 8.0, 10.0, 12.0]);
    assert_eq!(sum.backend, BackendKind::Scalar);
}

#[test]
fn self_check_error_names_the_artifact() {
    init_tracing();
    if !cxx_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let config = scalar_only_config(dir.path()).with_build_on_missing(false);

    compile_noop_library(dir.path(), &config.accelerated_path());

    let SelectionError::NoBackend { accelerated, scalar } =
        BackendSelector::from_config(&config).select().unwrap_err();
    match accelerated {
        PathError::SelfCheck { path, index, .. } => {
            assert_eq!(path, std::fs::canonicalize(config.accelerated_path()).unwrap());
            assert_eq!(index, 0);
        }
        other => panic!("unexpected accelerated error: {other}"),
    }
    assert!(matches!(scalar, PathError::ArtifactMissing(_)));
}
