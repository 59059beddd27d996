//! Process-wide server state.
//!
//! The [`Context`] owns the API client and the project resolver (and with it
//! the project cache). It is built once at startup and shared by the tool,
//! resource and prompt handlers through an `Arc`.

use crate::config::Config;
use crate::error::{Error, Result};
use honeybadger::api::HoneybadgerApi;
use honeybadger::domain::Project;
use honeybadger::resolver::ProjectResolver;
use honeybadger::transport::{HttpTransport, Transport};
use std::sync::Arc;
use tracing::debug;

/// Shared state for all MCP handlers.
pub struct Context {
    api: Arc<HoneybadgerApi>,
    resolver: ProjectResolver,
    default_project_id: Option<u64>,
}

impl Context {
    /// Build the context for a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be created (e.g. the
    /// base URL is invalid).
    pub fn new(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new(config.client.clone())?;
        debug!(base_url = %transport.base_url(), "Created HTTP transport");
        Ok(Self::with_transport(
            Arc::new(transport),
            config.default_project_id,
        ))
    }

    /// Build a context on top of any transport.
    pub fn with_transport(transport: Arc<dyn Transport>, default_project_id: Option<u64>) -> Self {
        let api = Arc::new(HoneybadgerApi::new(transport));
        let resolver = ProjectResolver::new(Arc::clone(&api));
        Self {
            api,
            resolver,
            default_project_id,
        }
    }

    /// The API client.
    #[must_use]
    pub fn api(&self) -> &HoneybadgerApi {
        &self.api
    }

    /// The project resolver.
    #[must_use]
    pub fn resolver(&self) -> &ProjectResolver {
        &self.resolver
    }

    /// The configured default project, if any.
    #[must_use]
    pub fn default_project_id(&self) -> Option<u64> {
        self.default_project_id
    }

    /// Resolve a project by name or ID, treating "no match" as an error.
    ///
    /// # Errors
    ///
    /// Returns `Error::ProjectNotFound` when nothing matches, or the API
    /// error if the project list cannot be fetched.
    pub async fn require_project(&self, name_or_id: &str) -> Result<Project> {
        self.resolver
            .find_project(name_or_id)
            .await?
            .ok_or_else(|| Error::ProjectNotFound(name_or_id.to_string()))
    }
}
