//! CLI command definitions using clap

use crate::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// vadd - elementwise vector addition on the best available backend
#[derive(Parser)]
#[command(name = "vadd")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json)
    #[arg(short = 'o', long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Configuration file path (YAML, TOML or JSON)
    #[arg(short = 'c', long, global = true, env = "VADD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Send two arrays to a running gateway and print their sum
    Add {
        /// Gateway base URL
        #[arg(short, long, env = "VADD_URL", default_value = "http://localhost:8000")]
        url: String,

        /// First operand, comma separated
        #[arg(
            long,
            value_delimiter = ',',
            allow_hyphen_values = true,
            default_values_t = vec![1.0, 2.0, 3.0, 4.0]
        )]
        array1: Vec<f32>,

        /// Second operand, comma separated
        #[arg(
            long,
            value_delimiter = ',',
            allow_hyphen_values = true,
            default_values_t = vec![5.0, 6.0, 7.0, 8.0]
        )]
        array2: Vec<f32>,

        /// Request timeout in seconds
        #[arg(long, default_value_t = 30)]
        timeout: u64,
    },

    /// Run backend selection now, building any missing artifacts
    Build,

    /// Show the compute configuration and the detected toolchain
    Info,
}
