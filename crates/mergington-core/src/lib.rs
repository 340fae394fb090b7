//! Mergington Core: activity model, in-memory directory, seed catalog,
//! errors and configuration.
//!
//! This crate has no HTTP dependencies; `mergington-api` exposes the store
//! over the network.
//!
//! # Modules
//!
//! - [`activity`]: activity records and the seed-file format
//! - [`store`]: the concurrently mutable [`ActivityStore`]
//! - [`seed`]: the built-in Mergington catalog
//! - [`config`]: TOML configuration
//! - [`error`]: error types and Result alias

pub mod activity;
pub mod config;
pub mod error;
pub mod seed;
pub mod store;

mod proptests;

pub use activity::{Activity, ActivitySeed, SeedFile};
pub use config::{AppConfig, CatalogConfig, LoggingConfig, ServerConfig};
pub use error::{Error, Result};
pub use store::{ActivityStore, Catalog};
