//! `honeybadger://` resources.
//!
//! URIs are parsed into a [`ResourceUri`] first, so malformed IDs are
//! rejected before any request is sent. Reading a resource renders one of
//! the text reports in [`crate::format`].

use crate::context::Context;
use crate::error::{Error, Result};
use crate::format;
use honeybadger::domain::parse_id;
use honeybadger::transport::QueryParams;
use std::sync::Arc;
use tracing::debug;

/// URI scheme prefix shared by every resource.
pub const SCHEME: &str = "honeybadger://";

/// MIME type of every resource body.
pub const MIME_TYPE: &str = "text/plain";

/// A parsed resource URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceUri {
    /// `honeybadger://projects`
    Projects,
    /// `honeybadger://projects/{projectId}`
    Project {
        /// Project ID.
        project_id: u64,
    },
    /// `honeybadger://projects/{projectId}/faults`
    ProjectFaults {
        /// Project ID.
        project_id: u64,
    },
    /// `honeybadger://projects/{projectId}/faults/{faultId}`
    Fault {
        /// Project ID.
        project_id: u64,
        /// Fault ID.
        fault_id: u64,
    },
    /// `honeybadger://projects/{projectId}/faults/{faultId}/notices`
    Notices {
        /// Project ID.
        project_id: u64,
        /// Fault ID.
        fault_id: u64,
    },
    /// `honeybadger://default-project`
    DefaultProject,
    /// `honeybadger://default-project/faults`
    DefaultProjectFaults,
}

impl ResourceUri {
    /// Parse a `honeybadger://` URI.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownResource` for URIs that match no pattern, and
    /// an `InvalidId` API error when an ID segment is not numeric.
    pub fn parse(uri: &str) -> Result<Self> {
        let unknown = || Error::UnknownResource(uri.to_string());
        let rest = uri.strip_prefix(SCHEME).ok_or_else(unknown)?;
        let segments: Vec<&str> = rest.trim_end_matches('/').split('/').collect();

        let parsed = match segments.as_slice() {
            ["projects"] => Self::Projects,
            ["projects", project] => Self::Project {
                project_id: parse_id("project ID", project)?,
            },
            ["projects", project, "faults"] => Self::ProjectFaults {
                project_id: parse_id("project ID", project)?,
            },
            ["projects", project, "faults", fault] => Self::Fault {
                project_id: parse_id("project ID", project)?,
                fault_id: parse_id("fault ID", fault)?,
            },
            ["projects", project, "faults", fault, "notices"] => Self::Notices {
                project_id: parse_id("project ID", project)?,
                fault_id: parse_id("fault ID", fault)?,
            },
            ["default-project"] => Self::DefaultProject,
            ["default-project", "faults"] => Self::DefaultProjectFaults,
            _ => return Err(unknown()),
        };

        Ok(parsed)
    }
}

/// A concrete resource advertised by `resources/list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    /// Resource URI.
    pub uri: &'static str,
    /// Short name.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
}

/// A parameterised resource advertised by `resources/templates/list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    /// RFC 6570 URI template.
    pub uri_template: &'static str,
    /// Short name.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
}

const TEMPLATES: [TemplateEntry; 4] = [
    TemplateEntry {
        uri_template: "honeybadger://projects/{projectId}",
        name: "project",
        description: "Details of a single project",
    },
    TemplateEntry {
        uri_template: "honeybadger://projects/{projectId}/faults",
        name: "project-faults",
        description: "Faults reported to a project",
    },
    TemplateEntry {
        uri_template: "honeybadger://projects/{projectId}/faults/{faultId}",
        name: "fault",
        description: "Details of a single fault",
    },
    TemplateEntry {
        uri_template: "honeybadger://projects/{projectId}/faults/{faultId}/notices",
        name: "notices",
        description: "Recent occurrences of a fault with backtraces",
    },
];

/// Resource handlers for the Honeybadger MCP server.
pub struct Resources {
    context: Arc<Context>,
}

impl Resources {
    /// Create a new Resources instance with the given context.
    pub fn new(context: Arc<Context>) -> Self {
        Self { context }
    }

    /// Fixed resources. The default-project entries are only listed when a
    /// default project is configured.
    #[must_use]
    pub fn list(&self) -> Vec<ResourceEntry> {
        let mut entries = vec![ResourceEntry {
            uri: "honeybadger://projects",
            name: "projects",
            description: "All Honeybadger projects visible to the API token",
        }];

        if self.context.default_project_id().is_some() {
            entries.push(ResourceEntry {
                uri: "honeybadger://default-project",
                name: "default-project",
                description: "The configured default project",
            });
            entries.push(ResourceEntry {
                uri: "honeybadger://default-project/faults",
                name: "default-project-faults",
                description: "Faults reported to the configured default project",
            });
        }

        entries
    }

    /// Parameterised resources.
    #[must_use]
    pub fn templates(&self) -> Vec<TemplateEntry> {
        TEMPLATES.to_vec()
    }

    /// Read a resource and render it as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the URI is unknown or malformed, names a
    /// default-project resource while none is configured, or the request
    /// fails.
    pub async fn read(&self, uri: &str) -> Result<String> {
        let resource = ResourceUri::parse(uri)?;
        debug!(uri, ?resource, "Reading resource");

        let api = self.context.api();
        let text = match resource {
            ResourceUri::Projects => format::projects_list(&api.get_projects().await?),
            ResourceUri::Project { project_id } => {
                format::project(&api.get_project(project_id).await?)
            }
            ResourceUri::ProjectFaults { project_id } => {
                format::faults_list(&api.get_faults(project_id, &QueryParams::new()).await?)
            }
            ResourceUri::Fault {
                project_id,
                fault_id,
            } => format::fault(&api.get_fault(project_id, fault_id).await?),
            ResourceUri::Notices {
                project_id,
                fault_id,
            } => format::notices_list(
                &api.get_notices(project_id, fault_id, &QueryParams::new())
                    .await?,
            ),
            ResourceUri::DefaultProject => {
                let project_id = self.default_project_id(uri)?;
                format::default_project(&api.get_project(project_id).await?)
            }
            ResourceUri::DefaultProjectFaults => {
                let project_id = self.default_project_id(uri)?;
                let faults = api.get_faults(project_id, &QueryParams::new()).await?;
                format::default_project_faults(project_id, &faults)
            }
        };

        Ok(text)
    }

    fn default_project_id(&self, uri: &str) -> Result<u64> {
        self.context
            .default_project_id()
            .ok_or_else(|| Error::UnknownResource(uri.to_string()))
    }
}
