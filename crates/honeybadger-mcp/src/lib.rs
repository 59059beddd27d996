//! MCP server for Honeybadger error tracking.
//!
//! This crate provides an MCP (Model Context Protocol) server that exposes the
//! read-only parts of the Honeybadger REST API to AI assistants.
//!
//! # Architecture
//!
//! The server uses the `rmcp` crate for MCP protocol handling and wraps the
//! `honeybadger` client crate. A single [`context::Context`] holds the API
//! client and project resolver and is shared by every handler.
//!
//! # Tools
//!
//! - `find_project` - Resolve a project by name or ID
//! - `search_faults` - Search a project's faults
//! - `get_backtrace` - Backtraces of a fault's most recent notices
//!
//! # Resources
//!
//! - `honeybadger://projects`
//! - `honeybadger://projects/{projectId}`
//! - `honeybadger://projects/{projectId}/faults`
//! - `honeybadger://projects/{projectId}/faults/{faultId}`
//! - `honeybadger://projects/{projectId}/faults/{faultId}/notices`
//! - `honeybadger://default-project` and `honeybadger://default-project/faults`
//!   when a default project is configured
//!
//! # Prompts
//!
//! - `analyze_error` - Analyze an error and suggest fixes
//! - `summarize_fault` - Concise summary of an error

pub mod config;
pub mod context;
pub mod error;
pub mod format;
pub mod models;
pub mod prompts;
pub mod resources;
pub mod server;
pub mod tools;

pub use error::{Error, Result};
pub use server::HoneybadgerMcpServer;
