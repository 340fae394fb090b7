//! # mergington-api
//!
//! HTTP API server for the Mergington activities directory.
//!
//! This crate provides the HTTP surface over [`mergington_core::ActivityStore`]:
//! - JSON endpoints to list activities and change participation
//! - Mapping of core errors to `404`/`400` responses with a `detail` body
//! - A root redirect to the static landing page
//! - Server lifecycle with graceful shutdown

#![warn(clippy::all)]

pub mod error;
pub mod routes;
pub mod server;

pub use error::{Error, ErrorBody, Result};
pub use routes::{AppState, HealthResponse, MessageResponse, router};
pub use server::{BoundServer, Server};
