//! MCP tool implementations.
//!
//! Each tool resolves the project, calls the API and renders a text report.
//! Argument validation happens before any request is sent.

use crate::context::Context;
use crate::error::{Error, Result};
use crate::format;
use crate::models::{DEFAULT_NOTICE_LIMIT, MAX_NOTICE_LIMIT, MAX_SEARCH_LIMIT};
use honeybadger::transport::QueryParams;
use rmcp::model::{CallToolResult, Content};
use std::sync::Arc;
use tracing::{debug, error};

/// Tool implementations for the Honeybadger MCP server.
pub struct Tools {
    context: Arc<Context>,
}

impl Tools {
    /// Create a new Tools instance with the given context.
    pub fn new(context: Arc<Context>) -> Self {
        Self { context }
    }

    /// Look up a project by name or ID.
    ///
    /// # Errors
    ///
    /// Returns `Error::ProjectNotFound` if nothing matches, or the API error
    /// if the project list cannot be fetched.
    pub async fn find_project(&self, name_or_id: &str) -> Result<String> {
        let project = self.context.require_project(name_or_id).await?;
        Ok(format::found_project(&project))
    }

    /// Search the faults of a project.
    ///
    /// # Errors
    ///
    /// Returns an error if `limit` is outside 1-100, the project is unknown,
    /// or the request fails.
    pub async fn search_faults(
        &self,
        project_name_or_id: &str,
        query: Option<&str>,
        environment: Option<&str>,
        limit: Option<i64>,
    ) -> Result<String> {
        let limit = check_limit(limit, MAX_SEARCH_LIMIT, "1-100")?;
        let project = self.context.require_project(project_name_or_id).await?;

        let params = build_fault_query(query, environment, limit);
        debug!(project_id = project.id, ?params, "Searching faults");

        let faults = self.context.api().get_faults(project.id, &params).await?;
        Ok(format::search_results(&faults, &project))
    }

    /// Backtraces of the most recent notices of a fault.
    ///
    /// # Errors
    ///
    /// Returns an error if `fault_id` is not positive, `limit` is outside
    /// 1-10, the project is unknown, or a request fails.
    pub async fn get_backtrace(
        &self,
        project_name_or_id: &str,
        fault_id: i64,
        limit: Option<i64>,
    ) -> Result<String> {
        let fault_id = u64::try_from(fault_id)
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| Error::InvalidArgument {
                field: "faultId",
                value: fault_id.to_string(),
                valid_values: "a positive integer",
            })?;
        let limit =
            check_limit(limit, MAX_NOTICE_LIMIT, "1-10")?.unwrap_or(DEFAULT_NOTICE_LIMIT);
        let project = self.context.require_project(project_name_or_id).await?;

        let api = self.context.api();
        let fault = api.get_fault(project.id, fault_id).await?;

        let mut params = QueryParams::new();
        params.insert("limit".to_string(), limit.to_string());
        let notices = api.get_notices(project.id, fault_id, &params).await?;

        if notices.is_empty() {
            return Ok(format!(
                "No notices found for fault ID {fault_id} in project \"{}\" (ID: {}).",
                project.name, project.id
            ));
        }

        Ok(format::backtraces(&fault, &notices, &project))
    }
}

/// Build the `q`/`limit` parameters for a fault search.
///
/// An `environment` is appended to the query as an `environment:<value>`
/// term unless the query already has one. Empty strings count as absent.
#[must_use]
pub fn build_fault_query(
    query: Option<&str>,
    environment: Option<&str>,
    limit: Option<u32>,
) -> QueryParams {
    let query = query.filter(|q| !q.is_empty());
    let environment = environment.filter(|e| !e.is_empty());

    let q = match (query, environment) {
        (Some(q), Some(env)) if !q.contains("environment:") => {
            Some(format!("{q} environment:{env}"))
        }
        (Some(q), _) => Some(q.to_string()),
        (None, Some(env)) => Some(format!("environment:{env}")),
        (None, None) => None,
    };

    let mut params = QueryParams::new();
    if let Some(q) = q {
        params.insert("q".to_string(), q);
    }
    if let Some(limit) = limit {
        params.insert("limit".to_string(), limit.to_string());
    }
    params
}

/// Convert a tool outcome into an MCP result.
///
/// Failures become tool errors (`is_error`) rather than protocol errors. A
/// missing project is reported as-is, anything else is prefixed with the
/// failed action, e.g. `Error searching faults: ...`.
pub fn into_call_tool_result(result: Result<String>, action: &str) -> CallToolResult {
    match result {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e @ Error::ProjectNotFound(_)) => {
            debug!(error = %e, "Project lookup found nothing");
            CallToolResult::error(vec![Content::text(e.to_string())])
        }
        Err(e) => {
            error!(error = %e, "Error {action}");
            CallToolResult::error(vec![Content::text(format!("Error {action}: {e}"))])
        }
    }
}

fn check_limit(limit: Option<i64>, max: i64, valid_values: &'static str) -> Result<Option<u32>> {
    let Some(value) = limit else {
        return Ok(None);
    };
    if !(1..=max).contains(&value) {
        return Err(Error::InvalidArgument {
            field: "limit",
            value: value.to_string(),
            valid_values,
        });
    }
    u32::try_from(value).map(Some).map_err(|_| Error::InvalidArgument {
        field: "limit",
        value: value.to_string(),
        valid_values,
    })
}
