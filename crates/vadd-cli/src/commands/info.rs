//! `vadd info` command implementation

use crate::error::CliError;
use crate::output::{OutputFormat, print_json};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use vadd_compute::{ComputeConfig, ToolchainReport};

#[derive(Serialize)]
struct InfoReport<'a> {
    version: &'static str,
    compute: &'a ComputeConfig,
    toolchain: ToolchainReport,
    accelerated_viable: bool,
}

/// Execute the `vadd info` command
pub fn run(config: &ComputeConfig, format: OutputFormat) -> Result<(), CliError> {
    let toolchain = ToolchainReport::detect(config);
    let report = InfoReport {
        version: env!("CARGO_PKG_VERSION"),
        compute: config,
        accelerated_viable: toolchain.accelerated_viable(),
        toolchain,
    };

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => print_text(&report),
    }
    Ok(())
}

fn print_text(report: &InfoReport<'_>) {
    println!();
    println!("  vadd {}", report.version.yellow());
    println!();

    println!("  {}", "Artifacts".bold());
    println!("    Directory:   {}", path_str(&report.compute.artifact_dir).cyan());
    println!("    Kernels:     {}", path_str(&report.compute.kernel_dir).cyan());
    println!(
        "    Accelerated: {} {}",
        path_str(&report.compute.accelerated_path()),
        presence(report.toolchain.accelerated_artifact)
    );
    println!(
        "    Scalar:      {} {}",
        path_str(&report.compute.scalar_path()),
        presence(report.toolchain.scalar_artifact)
    );
    println!();

    println!("  {}", "Toolchain".bold());
    println!(
        "    nvcc:        {}",
        resolved(&report.compute.nvcc, report.toolchain.nvcc.as_deref())
    );
    println!(
        "    C++:         {}",
        resolved(&report.compute.cxx, report.toolchain.cxx.as_deref())
    );
    println!("    CUDA device: {}", presence(report.toolchain.cuda_device));
    println!();

    println!("  {}", "Selection".bold());
    println!("    Build on missing: {}", report.compute.build_on_missing);
    println!("    Scalar mode:      {:?}", report.compute.scalar_mode);
    let verdict = if report.accelerated_viable {
        "accelerated path can be attempted".green()
    } else {
        "accelerated path will fall back to scalar".yellow()
    };
    println!("    {}", verdict);
    println!();
}

fn path_str(path: &Path) -> String {
    path.display().to_string()
}

fn presence(found: bool) -> colored::ColoredString {
    if found { "✓".green() } else { "✗".red() }
}

fn resolved(program: &str, path: Option<&Path>) -> String {
    match path {
        Some(p) => format!("{} ({})", program, p.display()).green().to_string(),
        None => format!("{} (not found)", program).red().to_string(),
    }
}
