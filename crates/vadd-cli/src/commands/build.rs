//! `vadd build` command implementation
//!
//! Runs the same selection the gateway performs at startup, so artifacts can
//! be compiled ahead of time and shipped next to the gateway binary.

use crate::error::CliError;
use crate::output::{OutputFormat, print_json};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use vadd_compute::{BackendKind, BackendSelector, ComputeConfig};

#[derive(Debug, Serialize)]
struct BuildReport {
    backend: BackendKind,
    artifact: Option<PathBuf>,
}

/// Execute the `vadd build` command
pub async fn run(config: ComputeConfig, format: OutputFormat) -> Result<(), CliError> {
    if format == OutputFormat::Text {
        println!("{} Selecting backend...", "→".green());
    }

    let backend =
        tokio::task::spawn_blocking(move || BackendSelector::from_config(&config).select())
            .await??;

    let report = BuildReport {
        backend: backend.kind(),
        artifact: backend.artifact().map(Path::to_path_buf),
    };

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            println!(
                "{} Backend ready: {}",
                "✓".green(),
                report.backend.to_string().cyan()
            );
            match &report.artifact {
                Some(path) => println!("  Artifact: {}", path.display()),
                None => println!("  Artifact: builtin kernel"),
            }
        }
    }
    Ok(())
}
