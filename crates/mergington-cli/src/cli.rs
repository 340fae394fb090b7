//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mergington_core::AppConfig;

/// Mergington activities service
#[derive(Parser, Debug)]
#[command(name = "mergington", version)]
#[command(about = "Mergington High School extracurricular activities service", long_about = None)]
pub struct Cli {
    /// Configuration file path (defaults to ./mergington.toml when present)
    #[arg(short, long, env = "MERGINGTON_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Config overrides
    #[command(flatten)]
    pub overrides: Overrides,

    /// Command to run; `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Settings that take precedence over the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct Overrides {
    /// Interface to bind
    #[arg(long, env = "MERGINGTON_HOST", global = true)]
    pub host: Option<String>,

    /// Port to bind
    #[arg(long, env = "MERGINGTON_PORT", global = true)]
    pub port: Option<u16>,

    /// Reject signups once an activity is full
    #[arg(
        long,
        env = "MERGINGTON_ENFORCE_CAPACITY",
        global = true,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub enforce_capacity: Option<bool>,

    /// TOML seed file replacing the built-in catalog
    #[arg(long, env = "MERGINGTON_SEED_FILE", global = true)]
    pub seed_file: Option<PathBuf>,
}

impl Overrides {
    /// Apply every override that was given.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(enforce) = self.enforce_capacity {
            config.catalog.enforce_capacity = enforce;
        }
        if let Some(seed_file) = &self.seed_file {
            config.catalog.seed_file = Some(seed_file.clone());
        }
    }
}

/// Top-level commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Print the active catalog in seed-file format
    Catalog,
    /// Configuration file operations
    Config {
        /// Config operation
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `config` subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Show the config file path that would be read
    Path,
    /// Print the resolved configuration
    Show,
    /// Print one resolved value by dotted key (e.g. server.port)
    Get {
        /// Dotted key
        key: String,
    },
    /// Set a value by dotted key in the config file
    Set {
        /// Dotted key
        key: String,
        /// New value (bool, integer, float or string)
        value: String,
    },
    /// Write a default config file
    Init {
        /// Destination (defaults to ./mergington.toml)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
