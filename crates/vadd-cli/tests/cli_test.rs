//! End-to-end tests for the `vadd` binary.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::str::contains;
use serde_json::Value;
use std::io::Write;
use std::sync::Arc;
use tempfile::tempdir;
use vadd_compute::Backend;
use vadd_gateway::{GatewayServer, ServerConfig};

/// `vadd` with a clean environment and colors off.
fn vadd() -> Command {
    let mut cmd = Command::cargo_bin("vadd").expect("vadd bin");
    cmd.env_remove("VADD_CONFIG")
        .env_remove("VADD_URL")
        .env("NO_COLOR", "1");
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

/// Serve the gateway on an ephemeral port with the builtin scalar backend.
async fn spawn_gateway() -> String {
    let server = GatewayServer::new(ServerConfig::default(), Arc::new(Backend::builtin()));
    let app = server.build_app();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[test]
fn info_json_reports_config_and_toolchain() {
    let dir = tempdir().unwrap();
    let output = vadd()
        .args(["info", "--output", "json"])
        .env("VADD_COMPUTE__ARTIFACT_DIR", dir.path())
        .env("VADD_COMPUTE__NVCC", "vadd-no-such-nvcc")
        .assert()
        .success()
        .get_output()
        .clone();

    let report = stdout_json(&output);
    assert_eq!(report["compute"]["nvcc"], "vadd-no-such-nvcc");
    assert_eq!(report["toolchain"]["nvcc"], Value::Null);
    assert_eq!(report["toolchain"]["accelerated_artifact"], false);
    assert_eq!(report["accelerated_viable"], false);
}

#[test]
fn info_text_lists_sections() {
    vadd()
        .arg("info")
        .assert()
        .success()
        .stdout(contains("Artifacts"))
        .stdout(contains("Toolchain"))
        .stdout(contains("Selection"));
}

#[test]
fn build_with_builtin_scalar_selects_scalar() {
    let dir = tempdir().unwrap();
    let output = vadd()
        .args(["build", "-o", "json"])
        .env("VADD_COMPUTE__ARTIFACT_DIR", dir.path())
        .env("VADD_COMPUTE__NVCC", "vadd-no-such-nvcc")
        .env("VADD_COMPUTE__SCALAR_MODE", "builtin")
        .assert()
        .success()
        .get_output()
        .clone();

    let report = stdout_json(&output);
    assert_eq!(report["backend"], "Scalar");
    assert_eq!(report["artifact"], Value::Null);
}

#[test]
fn build_reads_config_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("vadd.toml");
    let mut file = std::fs::File::create(&config_path).unwrap();
    writeln!(
        file,
        "[compute]\nartifact_dir = \"{}\"\nnvcc = \"vadd-no-such-nvcc\"\nscalar_mode = \"builtin\"",
        dir.path().display()
    )
    .unwrap();

    vadd()
        .arg("build")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(contains("Backend ready: Scalar"));
}

#[test]
fn build_without_any_backend_fails() {
    let dir = tempdir().unwrap();
    vadd()
        .arg("build")
        .env("VADD_COMPUTE__ARTIFACT_DIR", dir.path())
        .env("VADD_COMPUTE__BUILD_ON_MISSING", "false")
        .assert()
        .failure()
        .stderr(contains("no backend available"));
}

#[tokio::test(flavor = "multi_thread")]
async fn add_prints_sum_from_gateway() {
    let url = spawn_gateway().await;

    let output = tokio::task::spawn_blocking(move || {
        vadd()
            .args(["add", "--url", &url, "--output", "json"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let body = stdout_json(&output);
    assert_eq!(body["result"], serde_json::json!([6.0, 8.0, 10.0, 12.0]));
    assert_eq!(body["computation_mode"], "Scalar");
}

#[tokio::test(flavor = "multi_thread")]
async fn add_text_output() {
    let url = spawn_gateway().await;

    let output = tokio::task::spawn_blocking(move || {
        vadd()
            .args(["add", "--url", &url, "--array1", "-1,0.5", "--array2", "1,0.25"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Result: [0.0, 0.75]"), "stdout: {stdout}");
    assert!(stdout.contains("Computation mode: Scalar"), "stdout: {stdout}");
}

#[tokio::test(flavor = "multi_thread")]
async fn add_reports_length_mismatch() {
    let url = spawn_gateway().await;

    let output = tokio::task::spawn_blocking(move || {
        vadd()
            .args(["add", "--url", &url, "--array1", "1,2", "--array2", "1,2,3"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("400 LENGTH_MISMATCH"), "stderr: {stderr}");
}

#[test]
fn add_fails_when_gateway_unreachable() {
    vadd()
        .args(["add", "--url", "http://127.0.0.1:9", "--timeout", "5"])
        .assert()
        .failure()
        .stderr(contains("HTTP error"));
}

#[tokio::test(flavor = "multi_thread")]
async fn add_reports_overflowing_sum() {
    let url = spawn_gateway().await;

    let text_url = url.clone();
    let text = tokio::task::spawn_blocking(move || {
        vadd()
            .args(["add", "--url", &text_url, "--array1", "3e38,1", "--array2", "3e38,2"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();
    assert!(text.status.success(), "stderr: {}", String::from_utf8_lossy(&text.stderr));
    let stdout = String::from_utf8_lossy(&text.stdout);
    assert!(stdout.contains("Result: [inf, 3.0]"), "stdout: {stdout}");

    let json = tokio::task::spawn_blocking(move || {
        vadd()
            .args(["add", "--url", &url, "--array1", "-3e38,inf", "--array2", "-3e38,-inf", "-o", "json"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();
    assert!(json.status.success(), "stderr: {}", String::from_utf8_lossy(&json.stderr));
    let body = stdout_json(&json);
    assert_eq!(body["result"], serde_json::json!(["-inf", "NaN"]));
}
