//! Error types for the Honeybadger MCP server.

use thiserror::Error;

/// Errors that can occur in the Honeybadger MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// No API token was configured.
    #[error("HONEYBADGER_API_TOKEN environment variable is required.")]
    MissingToken,

    /// No project matched the given name or ID.
    #[error(
        "Project \"{0}\" not found. Please check the project name or ID and try again."
    )]
    ProjectNotFound(String),

    /// Invalid argument value provided.
    #[error("Invalid {field}: '{value}'. Valid values: {valid_values}")]
    InvalidArgument {
        /// The field name that had an invalid value.
        field: &'static str,
        /// The invalid value that was provided.
        value: String,
        /// Description of valid values.
        valid_values: &'static str,
    },

    /// The URI does not name any resource this server exposes.
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    /// An error from the Honeybadger API client.
    #[error("{0}")]
    Api(#[from] honeybadger::Error),

    /// MCP protocol error.
    #[error("MCP error: {0}")]
    Mcp(String),
}

/// Result type for Honeybadger MCP operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for rmcp::ErrorData {
    fn from(error: Error) -> Self {
        let message = error.to_string();
        match error {
            Error::UnknownResource(_) => Self::resource_not_found(message, None),
            Error::ProjectNotFound(_)
            | Error::InvalidArgument { .. }
            | Error::Api(honeybadger::Error::InvalidId { .. }) => {
                Self::invalid_params(message, None)
            }
            Error::MissingToken | Error::Api(_) | Error::Mcp(_) => {
                Self::internal_error(message, None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case::unknown(
        Error::UnknownResource("honeybadger://teams".into()),
        ErrorCode::RESOURCE_NOT_FOUND
    )]
    #[case::not_found(Error::ProjectNotFound("ghost".into()), ErrorCode::INVALID_PARAMS)]
    #[case::invalid_id(
        Error::Api(honeybadger::Error::InvalidId { field: "fault ID", value: "x".into() }),
        ErrorCode::INVALID_PARAMS
    )]
    #[case::upstream(
        Error::Api(honeybadger::Error::Api { status: 500, body: "boom".into() }),
        ErrorCode::INTERNAL_ERROR
    )]
    fn test_protocol_error_codes(#[case] error: Error, #[case] code: ErrorCode) {
        let mcp: rmcp::ErrorData = error.into();
        assert_eq!(mcp.code, code);
    }

    #[test]
    fn test_api_error_displays_inner_message() {
        let error = Error::Api(honeybadger::Error::Api {
            status: 404,
            body: "Not found".into(),
        });
        assert_eq!(error.to_string(), "Honeybadger API error (404): Not found");
    }
}
