//! vadd CLI - talk to a vadd gateway, prebuild artifacts, inspect the toolchain

mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use config::CliConfig;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries command output only
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_command_async(cli))
}

async fn run_command_async(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Add {
            url,
            array1,
            array2,
            timeout,
        } => {
            commands::add::run(
                &url,
                array1,
                array2,
                Duration::from_secs(timeout),
                cli.output,
            )
            .await?;
        }

        Commands::Build => {
            let config = CliConfig::load(cli.config.as_deref())?;
            commands::build::run(config.compute, cli.output).await?;
        }

        Commands::Info => {
            let config = CliConfig::load(cli.config.as_deref())?;
            commands::info::run(&config.compute, cli.output)?;
        }
    }

    Ok(())
}
