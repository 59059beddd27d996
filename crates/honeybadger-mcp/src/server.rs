//! MCP server implementation.
//!
//! Tools and prompts are dispatched through rmcp's routers. Resources are
//! served by the handler methods directly since their URIs are parsed here.

use crate::context::Context;
use crate::error::Error;
use crate::models::{FaultPromptArgs, FindProjectParams, GetBacktraceParams, SearchFaultsParams};
use crate::prompts::Prompts;
use crate::resources::{MIME_TYPE, Resources};
use crate::tools::{Tools, into_call_tool_result};
use rmcp::handler::server::router::prompt::PromptRouter;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    AnnotateAble, CallToolResult, GetPromptRequestParam, GetPromptResult, Implementation,
    ListPromptsResult, ListResourceTemplatesResult, ListResourcesResult, PaginatedRequestParam,
    PromptMessage, PromptMessageRole, ProtocolVersion, RawResource, RawResourceTemplate,
    ReadResourceRequestParam, ReadResourceResult, Resource, ResourceContents, ResourceTemplate,
    ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::transport::stdio;
use rmcp::{
    ErrorData as McpError, RoleServer, ServiceExt, handler::server::ServerHandler, prompt,
    prompt_handler, prompt_router, tool, tool_handler, tool_router,
};
use std::sync::Arc;
use tracing::{error, info};

/// The Honeybadger MCP server.
///
/// Provides MCP protocol handling over stdio transport.
#[derive(Clone)]
pub struct HoneybadgerMcpServer {
    /// Shared API client, resolver and configuration.
    context: Arc<Context>,
    /// Tool implementations.
    tools: Arc<Tools>,
    /// Resource handlers.
    resources: Arc<Resources>,
    /// Prompt builders.
    prompts: Arc<Prompts>,
    /// Tool router for MCP dispatch.
    tool_router: ToolRouter<Self>,
    /// Prompt router for MCP dispatch.
    prompt_router: PromptRouter<Self>,
}

#[tool_router]
impl HoneybadgerMcpServer {
    /// Find a project by name or ID.
    #[tool(description = "Find a Honeybadger project by name or ID")]
    async fn find_project(
        &self,
        Parameters(params): Parameters<FindProjectParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(into_call_tool_result(
            self.tools.find_project(&params.name_or_id).await,
            "finding project",
        ))
    }

    /// Search faults within a project.
    #[tool(
        description = "Search for faults in a Honeybadger project with optional query, environment filter and result limit"
    )]
    async fn search_faults(
        &self,
        Parameters(params): Parameters<SearchFaultsParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .tools
            .search_faults(
                &params.project_name_or_id,
                params.query.as_deref(),
                params.environment.as_deref(),
                params.limit,
            )
            .await;
        Ok(into_call_tool_result(result, "searching faults"))
    }

    /// Show backtraces for the most recent notices of a fault.
    #[tool(description = "Get the backtrace of the most recent occurrences of a fault")]
    async fn get_backtrace(
        &self,
        Parameters(params): Parameters<GetBacktraceParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .tools
            .get_backtrace(&params.project_name_or_id, params.fault_id, params.limit)
            .await;
        Ok(into_call_tool_result(result, "getting backtrace"))
    }
}

#[prompt_router]
impl HoneybadgerMcpServer {
    /// Ask the model to analyse an error and suggest fixes.
    #[prompt(name = "analyze_error", description = "Analyze an error and suggest fixes")]
    async fn analyze_error(
        &self,
        Parameters(args): Parameters<FaultPromptArgs>,
    ) -> Result<GetPromptResult, McpError> {
        let text = self
            .prompts
            .analyze_error(&args.project_name_or_id, &args.fault_id)
            .await
            .map_err(|e| log_failure("analyze_error prompt", e))?;
        Ok(user_prompt("Analyze an error and suggest fixes", text))
    }

    /// Ask the model for a concise summary of a fault.
    #[prompt(
        name = "summarize_fault",
        description = "Provide a concise summary of an error"
    )]
    async fn summarize_fault(
        &self,
        Parameters(args): Parameters<FaultPromptArgs>,
    ) -> Result<GetPromptResult, McpError> {
        let text = self
            .prompts
            .summarize_fault(&args.project_name_or_id, &args.fault_id)
            .await
            .map_err(|e| log_failure("summarize_fault prompt", e))?;
        Ok(user_prompt("Provide a concise summary of an error", text))
    }
}

impl HoneybadgerMcpServer {
    /// Create a new Honeybadger MCP server on top of a context.
    #[must_use]
    pub fn new(context: Arc<Context>) -> Self {
        Self {
            tools: Arc::new(Tools::new(Arc::clone(&context))),
            resources: Arc::new(Resources::new(Arc::clone(&context))),
            prompts: Arc::new(Prompts::new(Arc::clone(&context))),
            context,
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
        }
    }

    /// Get a reference to the context.
    #[must_use]
    pub fn context(&self) -> &Arc<Context> {
        &self.context
    }

    /// Serve MCP over stdin/stdout until the client disconnects.
    ///
    /// # Errors
    ///
    /// Returns `Error::Mcp` if the handshake fails or the service task
    /// terminates abnormally.
    pub async fn run(self) -> crate::Result<()> {
        info!("Honeybadger MCP server listening on stdio");

        let service = self
            .serve(stdio())
            .await
            .map_err(|e| Error::Mcp(e.to_string()))?;
        let reason = service
            .waiting()
            .await
            .map_err(|e| Error::Mcp(e.to_string()))?;

        info!(?reason, "Honeybadger MCP server stopped");
        Ok(())
    }

    fn resource_list(&self) -> Vec<Resource> {
        self.resources
            .list()
            .into_iter()
            .map(|entry| {
                let mut raw = RawResource::new(entry.uri, entry.name);
                raw.description = Some(entry.description.to_string());
                raw.mime_type = Some(MIME_TYPE.to_string());
                raw.no_annotation()
            })
            .collect()
    }

    fn resource_templates(&self) -> Vec<ResourceTemplate> {
        self.resources
            .templates()
            .into_iter()
            .map(|entry| {
                RawResourceTemplate {
                    uri_template: entry.uri_template.to_string(),
                    name: entry.name.to_string(),
                    title: None,
                    description: Some(entry.description.to_string()),
                    mime_type: Some(MIME_TYPE.to_string()),
                }
                .no_annotation()
            })
            .collect()
    }
}

fn user_prompt(description: &str, text: String) -> GetPromptResult {
    GetPromptResult {
        description: Some(description.to_string()),
        messages: vec![PromptMessage::new_text(PromptMessageRole::User, text)],
    }
}

fn log_failure(what: &str, e: Error) -> McpError {
    error!(error = %e, "Error generating {what}");
    e.into()
}

#[tool_handler]
#[prompt_handler]
impl ServerHandler for HoneybadgerMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_prompts()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info: Implementation {
                name: "honeybadger-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Read-only access to Honeybadger error tracking. Use find_project to resolve a project by name, then search_faults and get_backtrace to inspect errors."
                    .into(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let resources = self.resource_list();
        Ok(ListResourcesResult::with_all_items(resources))
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        let templates = self.resource_templates();
        Ok(ListResourceTemplatesResult::with_all_items(templates))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let text = self
            .resources
            .read(&request.uri)
            .await
            .map_err(|e| log_failure(&format!("resource {}", request.uri), e))?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, request.uri)],
        })
    }
}
