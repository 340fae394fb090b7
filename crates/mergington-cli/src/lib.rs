//! # mergington-cli
//!
//! Command-line entry point for the Mergington activities service:
//! - `serve`: run the HTTP API
//! - `catalog`: print the active catalog as a seed file
//! - `config`: inspect and edit the TOML configuration

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config_handlers;
pub mod logging;

use mergington_core::{AppConfig, Result};

/// Render the catalog the given configuration would serve, as seed-file TOML.
pub fn render_catalog(config: &AppConfig) -> Result<String> {
    let store = config.catalog.build_store()?;
    store.list().into_seed_file().to_toml_string()
}
