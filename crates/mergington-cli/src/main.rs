//! Mergington CLI
//!
//! Runs the activities API and manages its configuration.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use mergington_api::Server;
use mergington_cli::cli::{Cli, Command};
use mergington_cli::config_handlers::{handle_config_command, load_resolved};
use mergington_cli::{logging, render_catalog};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let config = load_resolved(config_path, &cli.overrides)?;
            logging::init(&config.logging.filter);

            let store = config
                .catalog
                .build_store()
                .context("failed to load activity catalog")?;
            tracing::info!(
                activities = store.len(),
                enforce_capacity = store.enforces_capacity(),
                "activity directory ready"
            );

            let server = Server::new(&config.server, store)?;
            server.bind().await?.serve().await?;
        }
        Command::Catalog => {
            let config = load_resolved(config_path, &cli.overrides)?;
            print!("{}", render_catalog(&config)?);
        }
        Command::Config { action } => {
            handle_config_command(config_path, &cli.overrides, action)?;
        }
    }

    Ok(())
}
