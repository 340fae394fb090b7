//! Service configuration.
//!
//! Configuration is read from a TOML file and then overridden by CLI flags
//! and environment variables in the binary. All sections are optional;
//! missing keys fall back to [`AppConfig::default`].
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8000
//!
//! [catalog]
//! enforce_capacity = false
//! seed_file = "activities.toml"
//!
//! [logging]
//! filter = "info"
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::activity::{Activity, SeedFile};
use crate::store::ActivityStore;
use crate::{Error, Result};

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "mergington.toml";

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Activity catalog settings.
    pub catalog: CatalogConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind; 0 picks an ephemeral port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// Parse `host:port` into a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let raw = if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        };
        raw.parse()
            .map_err(|e| Error::config(format!("invalid listen address {raw}: {e}")))
    }
}

/// Activity catalog settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Reject signups once an activity reaches `max_participants`.
    pub enforce_capacity: bool,
    /// TOML seed file replacing the built-in catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<PathBuf>,
}

impl CatalogConfig {
    /// Load the configured catalog entries (seed file or built-in).
    pub fn load_entries(&self) -> Result<Vec<(String, Activity)>> {
        match &self.seed_file {
            Some(path) => {
                let content =
                    std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
                let seed = SeedFile::from_toml_str(&content)?;
                if seed.activities.is_empty() {
                    return Err(Error::config(format!(
                        "seed file {} defines no activities",
                        path.display()
                    )));
                }
                log::info!(
                    "Loaded {} activities from {}",
                    seed.activities.len(),
                    path.display()
                );
                Ok(seed.into_entries())
            }
            None => Ok(crate::seed::default_catalog()),
        }
    }

    /// Build the store this configuration describes.
    pub fn build_store(&self) -> Result<ActivityStore> {
        let store = ActivityStore::new(self.load_entries()?)?;
        Ok(store.with_capacity_enforced(self.enforce_capacity))
    }
}

/// Logging settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Resolve which config file to read.
    ///
    /// An explicit path wins; otherwise [`DEFAULT_CONFIG_FILE`] in the
    /// working directory is used if it exists.
    pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                local.exists().then_some(local)
            }
        }
    }

    /// Load configuration.
    ///
    /// A missing explicit file is an error; a missing default file yields
    /// the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit) {
            Some(path) => {
                let content =
                    std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
                let config: Self = toml::from_str(&content).map_err(|e| {
                    Error::config(format!("Failed to parse {}: {e}", path.display()))
                })?;
                log::debug!("Loaded configuration from {}", path.display());
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Render as TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}
