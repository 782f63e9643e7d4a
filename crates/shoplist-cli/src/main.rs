//! shoplist CLI - a shopping list in the terminal
//!
//! Items live for the length of one session; nothing is written to disk
//! unless a share or export target asks for it.

mod cli;
mod commands;
mod config;
mod error;
mod session;
mod share;

#[cfg(test)]
mod tests;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands, ConfigCommands};
use crate::commands::completions::run_completions;
use crate::commands::config::{run_config_init, run_config_show};
use crate::commands::session::run_session;
use crate::config::{resolve_config_path, CliConfig};
use crate::error::CliError;

const DEFAULT_LOG_FILTER: &str = "warn,shoplist=info,shoplist_core=info";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = resolve_config_path(cli.config);

    match cli.command {
        Some(Commands::Session { script }) => {
            let config = CliConfig::load_from_path(&config_path)?;
            run_session(&config, script.as_deref()).await?;
        }
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())?;
        }
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Init { force } => run_config_init(&config_path, force)?,
            ConfigCommands::Show => run_config_show(&config_path)?,
        },
        None => {
            let config = CliConfig::load_from_path(&config_path)?;
            run_session(&config, None).await?;
        }
    }

    Ok(())
}
