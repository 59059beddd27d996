//! Prompt templates.
//!
//! Both prompts resolve the project, fetch the fault and render a single
//! user message asking the model to analyse or summarise it.

use crate::context::Context;
use crate::error::Result;
use crate::format;
use honeybadger::domain::{Fault, Notice, Project, parse_id};
use honeybadger::transport::QueryParams;
use std::sync::Arc;

/// Prompt builders for the Honeybadger MCP server.
pub struct Prompts {
    context: Arc<Context>,
}

impl Prompts {
    /// Create a new Prompts instance with the given context.
    pub fn new(context: Arc<Context>) -> Self {
        Self { context }
    }

    /// Text of the `analyze_error` prompt.
    ///
    /// Includes request context and backtrace from the latest notice when
    /// one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the fault ID is not numeric, the project is
    /// unknown, or a request fails.
    pub async fn analyze_error(&self, project_name_or_id: &str, fault_id: &str) -> Result<String> {
        let fault_id = parse_id("fault ID", fault_id)?;
        let project = self.context.require_project(project_name_or_id).await?;

        let api = self.context.api();
        let fault = api.get_fault(project.id, fault_id).await?;

        let mut params = QueryParams::new();
        params.insert("limit".to_string(), "1".to_string());
        let notices = api.get_notices(project.id, fault_id, &params).await?;

        Ok(analysis_prompt(&fault, notices.first(), &project))
    }

    /// Text of the `summarize_fault` prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the fault ID is not numeric, the project is
    /// unknown, or the request fails.
    pub async fn summarize_fault(
        &self,
        project_name_or_id: &str,
        fault_id: &str,
    ) -> Result<String> {
        let fault_id = parse_id("fault ID", fault_id)?;
        let project = self.context.require_project(project_name_or_id).await?;
        let fault = self.context.api().get_fault(project.id, fault_id).await?;

        Ok(summary_prompt(&fault, &project))
    }
}

/// Render the error analysis request.
#[must_use]
pub fn analysis_prompt(fault: &Fault, notice: Option<&Notice>, project: &Project) -> String {
    let mut prompt = format!(
        "Please analyze the following error and suggest potential fixes:\n\n{}\n",
        fault_details(fault, project, None)
    );

    if let Some(notice) = notice {
        if let Some(request) = &notice.request {
            if let Some(url) = format::non_empty(request.url.as_deref()) {
                prompt.push_str(&format!("REQUEST URL: {url}\n"));
            }
            if let Some(params) = request.params.as_ref().filter(|p| !p.is_null()) {
                let pretty =
                    serde_json::to_string_pretty(params).unwrap_or_else(|_| params.to_string());
                prompt.push_str(&format!("REQUEST PARAMETERS: {pretty}\n"));
            }
        }

        if !notice.backtrace.is_empty() {
            prompt.push_str("\nBACKTRACE:\n");
            prompt.push_str(&format::numbered_frames(&notice.backtrace));
        }
    }

    prompt.push_str(
        "\nBased on the error type, message, and backtrace above:\n\
         1. What is likely causing this error?\n\
         2. What are potential solutions to fix it?\n\
         3. What additional information might be needed to better diagnose the issue?\n\n\
         Please provide a detailed analysis with specific code suggestions if possible.",
    );

    prompt
}

/// Render the fault summary request.
#[must_use]
pub fn summary_prompt(fault: &Fault, project: &Project) -> String {
    format!(
        "Please provide a concise summary of the following error:\n\n{}\n\
         Please summarize:\n\
         1. What this error means in simple terms\n\
         2. Potential causes\n\
         3. Common ways to address this type of error\n\n\
         Keep your summary concise and actionable.",
        fault_details(fault, project, Some(&format::status(fault)))
    )
}

fn fault_details(fault: &Fault, project: &Project, status: Option<&str>) -> String {
    let mut details = format!(
        "PROJECT: {}\nERROR TYPE: {}\nERROR MESSAGE: {}\n",
        project.name, fault.klass, fault.message
    );
    if let Some(status) = status {
        details.push_str(&format!("STATUS: {status}\n"));
    }
    details.push_str(&format!(
        "ENVIRONMENT: {}\nCOMPONENT: {}\nOCCURRENCES: {}\nFIRST SEEN: {}\nLAST SEEN: {}\n",
        format::environment(fault),
        format::non_empty(fault.component.as_deref()).unwrap_or("Not specified"),
        fault.notices_count,
        fault.created_at,
        fault.last_notice_at,
    ));
    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use honeybadger::domain::{BacktraceFrame, NoticeRequest};
    use honeybadger::mock::MockTransport;
    use serde_json::json;

    fn project() -> Project {
        Project {
            id: 7,
            name: "Storefront".to_string(),
            ..Project::default()
        }
    }

    fn fault() -> Fault {
        Fault {
            id: 42,
            project_id: 7,
            klass: "ZeroDivisionError".to_string(),
            message: "divided by 0".to_string(),
            notices_count: 3,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            last_notice_at: "2024-02-01T00:00:00Z".to_string(),
            ..Fault::default()
        }
    }

    #[test]
    fn test_analysis_prompt_without_notice() {
        let prompt = analysis_prompt(&fault(), None, &project());

        assert!(prompt.starts_with(
            "Please analyze the following error and suggest potential fixes:\n\n\
             PROJECT: Storefront\nERROR TYPE: ZeroDivisionError\nERROR MESSAGE: divided by 0\n\
             ENVIRONMENT: Not specified\nCOMPONENT: Not specified\nOCCURRENCES: 3\n"
        ));
        assert!(!prompt.contains("BACKTRACE"));
        assert!(prompt.ends_with("specific code suggestions if possible."));
    }

    #[test]
    fn test_analysis_prompt_with_notice() {
        let notice = Notice {
            id: "n-1".to_string(),
            request: Some(NoticeRequest {
                url: Some("https://shop.example/cart".to_string()),
                params: Some(json!({"item": 5})),
                ..NoticeRequest::default()
            }),
            backtrace: vec![
                BacktraceFrame {
                    file: "app/models/cart.rb".to_string(),
                    number: "12".to_string(),
                    method: "total".to_string(),
                },
                BacktraceFrame {
                    file: "app/controllers/carts_controller.rb".to_string(),
                    number: "8".to_string(),
                    method: "show".to_string(),
                },
            ],
            ..Notice::default()
        };

        let prompt = analysis_prompt(&fault(), Some(&notice), &project());

        assert!(prompt.contains("REQUEST URL: https://shop.example/cart\n"));
        assert!(prompt.contains("REQUEST PARAMETERS: {\n  \"item\": 5\n}\n"));
        assert!(prompt.contains(
            "\nBACKTRACE:\n1. app/models/cart.rb:12 in `total`\n\
             2. app/controllers/carts_controller.rb:8 in `show`\n"
        ));
    }

    #[test]
    fn test_summary_prompt_includes_status() {
        let mut fault = fault();
        fault.resolved = true;
        fault.ignored = true;

        let prompt = summary_prompt(&fault, &project());

        assert!(prompt.contains("ERROR MESSAGE: divided by 0\nSTATUS: Resolved, Ignored\n"));
        assert!(prompt.ends_with("Keep your summary concise and actionable."));
    }

    #[tokio::test]
    async fn test_invalid_fault_id_sends_no_request() {
        let mock = Arc::new(MockTransport::new());
        let prompts = Prompts::new(Arc::new(Context::with_transport(mock.clone(), None)));

        assert!(prompts.summarize_fault("7", "abc").await.is_err());
        assert!(mock.requests().is_empty());
    }
}
