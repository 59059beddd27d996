//! Server configuration from command-line flags and environment variables.

use crate::error::{Error, Result};
use clap::Parser;
use honeybadger::transport::{ClientConfig, DEFAULT_BASE_URL};
use tracing::warn;

/// Command-line arguments. Every flag falls back to an environment variable.
#[derive(Parser, Debug, Clone)]
#[command(name = "honeybadger-mcp", version, about = "Read-only MCP server for Honeybadger")]
pub struct Args {
    /// Honeybadger personal API token
    #[arg(long, env = "HONEYBADGER_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Numeric ID of the project exposed as `honeybadger://default-project`
    #[arg(long, env = "HONEYBADGER_PROJECT_ID")]
    pub project_id: Option<String>,

    /// API root URL
    #[arg(long, env = "HONEYBADGER_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

/// Validated server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Connection settings for the API client.
    pub client: ClientConfig,
    /// Default project, if one was configured and is numeric.
    pub default_project_id: Option<u64>,
}

impl Config {
    /// Validate parsed arguments.
    ///
    /// A missing or blank token is an error. A non-numeric default project is
    /// ignored with a warning, leaving the default-project resources disabled.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingToken` if no API token was supplied.
    pub fn from_args(args: Args) -> Result<Self> {
        let api_token = args
            .api_token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(Error::MissingToken)?;

        let default_project_id = args
            .project_id
            .filter(|id| !id.trim().is_empty())
            .and_then(|id| match id.trim().parse::<u64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    warn!(project_id = %id, "Ignoring non-numeric default project ID");
                    None
                }
            });

        Ok(Self {
            client: ClientConfig::new(api_token).with_base_url(args.base_url),
            default_project_id,
        })
    }
}
