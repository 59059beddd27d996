//! Honeybadger MCP server binary.
//!
//! This binary runs the MCP server using stdio transport.

use clap::Parser;
use honeybadger_mcp::HoneybadgerMcpServer;
use honeybadger_mcp::config::{Args, Config};
use honeybadger_mcp::context::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "honeybadger=info,honeybadger_mcp=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the MCP protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = Config::from_args(Args::parse())?;

    tracing::info!(
        default_project_id = ?config.default_project_id,
        "Starting honeybadger-mcp server"
    );

    let context = Context::new(&config)?;
    let server = HoneybadgerMcpServer::new(Arc::new(context));
    server.run().await?;

    Ok(())
}
