//! Build actions that produce backend artifacts
//!
//! A build action is opaque to the selector: it either yields an
//! [`Artifact`] or a [`BuildError`]. The real actions shell out to the CUDA
//! and C++ toolchains; [`BuiltinScalarBuild`] stands in for the scalar build
//! when the in-process kernel is configured.

use crate::config::ComputeConfig;
use crate::error::BuildError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Device-side library the accelerated bridge links against (`libcuda_add.so`).
pub const DEVICE_LIBRARY: &str = "cuda_add";

/// What a successful build produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    /// Shared library exporting `add_vectors`
    Library(PathBuf),
    /// No file; use the builtin scalar kernel
    Builtin,
}

/// An external action that makes a backend artifact available.
pub trait BuildAction: Send + Sync {
    /// Human-readable description for logs
    fn describe(&self) -> String;

    fn build(&self) -> Result<Artifact, BuildError>;
}

/// One toolchain invocation.
#[derive(Debug, Clone)]
pub struct CommandStep {
    pub program: String,
    pub args: Vec<OsString>,
}

impl CommandStep {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Resolve the program on `PATH` and run it to completion.
    fn run(&self) -> Result<(), BuildError> {
        let program = which::which(&self.program).map_err(|_| BuildError::ToolchainMissing {
            program: self.program.clone(),
        })?;

        let mut cmd = Command::new(&program);
        cmd.args(&self.args);
        debug!(command = ?cmd, "running build step");

        let output = cmd.output().map_err(|source| BuildError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(BuildError::CommandFailed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

/// A sequence of toolchain steps that must produce `output`.
///
/// Steps run in order and the first failure aborts the build; nothing is
/// retried.
#[derive(Debug, Clone)]
pub struct CommandBuild {
    label: String,
    steps: Vec<CommandStep>,
    output: PathBuf,
}

impl CommandBuild {
    pub fn new(label: impl Into<String>, output: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            steps: Vec::new(),
            output: output.into(),
        }
    }

    pub fn step(mut self, step: CommandStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn steps(&self) -> &[CommandStep] {
        &self.steps
    }

    /// `nvcc` compiles the device kernel into `libcuda_add.so`, then the host
    /// compiler links the `add_vectors` bridge against it with an `$ORIGIN`
    /// rpath so the pair loads from `artifact_dir`.
    pub fn accelerated(config: &ComputeConfig) -> Self {
        let device_lib = config.artifact_dir.join(format!("lib{DEVICE_LIBRARY}.so"));

        let mut nvcc = CommandStep::new(&config.nvcc)
            .arg("-shared")
            .arg("-O3")
            .args(["-Xcompiler", "-fPIC"]);
        if let Some(arch) = &config.cuda_arch {
            nvcc = nvcc.arg("-arch").arg(arch);
        }
        let nvcc = nvcc
            .arg("-o")
            .arg(&device_lib)
            .arg(config.kernel_dir.join("cuda_add.cu"));

        let bridge = CommandStep::new(&config.cxx)
            .args(["-shared", "-fPIC", "-O2"])
            .arg("-o")
            .arg(config.accelerated_path())
            .arg(config.kernel_dir.join("add_cuda_bridge.cpp"))
            .arg(format!("-L{}", config.artifact_dir.display()))
            .arg(format!("-l{DEVICE_LIBRARY}"))
            .arg("-Wl,-rpath,$ORIGIN");

        Self::new("accelerated", config.accelerated_path())
            .step(nvcc)
            .step(bridge)
    }

    /// The host compiler builds `add_cpu.cpp` into the scalar artifact.
    pub fn scalar(config: &ComputeConfig) -> Self {
        let cxx = CommandStep::new(&config.cxx)
            .args(["-shared", "-fPIC", "-O2"])
            .arg("-o")
            .arg(config.scalar_path())
            .arg(config.kernel_dir.join("add_cpu.cpp"));

        Self::new("scalar", config.scalar_path()).step(cxx)
    }
}

impl BuildAction for CommandBuild {
    fn describe(&self) -> String {
        let programs: Vec<&str> = self.steps.iter().map(|s| s.program.as_str()).collect();
        format!(
            "{} build ({}) -> {}",
            self.label,
            programs.join(" + "),
            self.output.display()
        )
    }

    fn build(&self) -> Result<Artifact, BuildError> {
        if let Some(parent) = self.output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        for step in &self.steps {
            step.run()?;
        }

        if !self.output.exists() {
            return Err(BuildError::OutputMissing(self.output.clone()));
        }

        info!(label = %self.label, output = %self.output.display(), "artifact built");
        Ok(Artifact::Library(self.output.clone()))
    }
}

/// Scalar "build" that always succeeds with the builtin kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinScalarBuild;

impl BuildAction for BuiltinScalarBuild {
    fn describe(&self) -> String {
        "builtin scalar kernel".to_string()
    }

    fn build(&self) -> Result<Artifact, BuildError> {
        Ok(Artifact::Builtin)
    }
}
