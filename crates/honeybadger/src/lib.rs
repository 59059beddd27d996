//! Honeybadger - a read-only client for the Honeybadger error-tracking API.
//!
//! This crate provides the API access layer used by `honeybadger-mcp`:
//!
//! - [`transport`]: authenticated GET requests against the REST API
//! - [`api`]: typed accessors for projects, faults, notices, and affected users
//! - [`resolver`]: project lookup by numeric ID or case-insensitive name
//! - [`domain`]: the records returned by the upstream service
//!
//! The client never issues write requests. The transport only knows how to
//! `GET`, and no accessor exists for updating or deleting upstream data.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use honeybadger::api::HoneybadgerApi;
//! use honeybadger::resolver::ProjectResolver;
//! use honeybadger::transport::{ClientConfig, HttpTransport};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> honeybadger::Result<()> {
//!     let transport = HttpTransport::new(ClientConfig::new("my-api-token"))?;
//!     let api = Arc::new(HoneybadgerApi::new(Arc::new(transport)));
//!     let resolver = ProjectResolver::new(Arc::clone(&api));
//!
//!     if let Some(project) = resolver.find_project("Storefront").await? {
//!         let faults = api.get_faults(project.id, &Default::default()).await?;
//!         println!("{} has {} faults", project.name, faults.len());
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]

pub mod api;
pub mod domain;
pub mod error;
pub mod resolver;
pub mod transport;

#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use error::{Error, Result};
