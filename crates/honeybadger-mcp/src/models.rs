//! MCP request parameter models.
//!
//! Field names are camelCase on the wire (`projectNameOrId`, `faultId`).
//! Numeric inputs are accepted as signed integers so out-of-range values reach
//! the tool and are reported as a tool error rather than a decode failure.

use schemars::JsonSchema;
use serde::Deserialize;

/// Largest `limit` accepted by `search_faults`.
pub const MAX_SEARCH_LIMIT: i64 = 100;

/// Largest `limit` accepted by `get_backtrace`.
pub const MAX_NOTICE_LIMIT: i64 = 10;

/// Notices fetched by `get_backtrace` when no limit is given.
pub const DEFAULT_NOTICE_LIMIT: u32 = 1;

/// Parameters for the `find_project` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FindProjectParams {
    /// The name or ID of the project to find
    pub name_or_id: String,
}

/// Parameters for the `search_faults` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchFaultsParams {
    /// The name or ID of the project to search
    pub project_name_or_id: String,

    /// Search query (e.g. "is:unresolved environment:production")
    #[serde(default)]
    pub query: Option<String>,

    /// Filter by environment (e.g. "production", "development")
    #[serde(default)]
    pub environment: Option<String>,

    /// Maximum number of results to return (1-100)
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Parameters for the `get_backtrace` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetBacktraceParams {
    /// The name or ID of the project
    pub project_name_or_id: String,

    /// The ID of the fault
    pub fault_id: i64,

    /// Maximum number of notices to include (1-10)
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Arguments for the `analyze_error` and `summarize_fault` prompts.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FaultPromptArgs {
    /// The name or ID of the project containing the error
    pub project_name_or_id: String,

    /// The ID of the fault/error
    pub fault_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_params_use_camel_case() {
        let params: SearchFaultsParams = serde_json::from_value(json!({
            "projectNameOrId": "Storefront",
            "environment": "production",
            "limit": 5
        }))
        .unwrap();

        assert_eq!(params.project_name_or_id, "Storefront");
        assert_eq!(params.query, None);
        assert_eq!(params.limit, Some(5));
    }

    #[test]
    fn test_backtrace_params_accept_negative_fault_id() {
        let params: GetBacktraceParams =
            serde_json::from_value(json!({"projectNameOrId": "7", "faultId": -1})).unwrap();
        assert_eq!(params.fault_id, -1);
    }

    #[test]
    fn test_prompt_args_require_fault_id() {
        let result: Result<FaultPromptArgs, _> =
            serde_json::from_value(json!({"projectNameOrId": "7"}));
        assert!(result.is_err());
    }
}
