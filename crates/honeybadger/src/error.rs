//! Error types for the Honeybadger API client.

use thiserror::Error;

/// The error type for Honeybadger API operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The upstream API answered with a non-2xx status.
    #[error("Honeybadger API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body text.
        body: String,
    },

    /// The request never produced a response (connection, TLS, body read).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be decoded into the expected record.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured base URL is not a valid absolute URL.
    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },

    /// A caller-supplied identifier is not a valid numeric ID.
    #[error("Invalid {field}: '{value}' is not a numeric ID")]
    InvalidId {
        /// Name of the identifier (e.g. "project ID").
        field: &'static str,
        /// The value that failed to parse.
        value: String,
    },
}

impl Error {
    /// HTTP status of an upstream error, if this is one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A specialized Result type for Honeybadger API operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message_carries_status_and_body() {
        let err = Error::Api {
            status: 404,
            body: r#"{"errors":"Not found"}"#.to_string(),
        };
        assert_eq!(
            err.to_string(),
            r#"Honeybadger API error (404): {"errors":"Not found"}"#
        );
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_invalid_id_has_no_status() {
        let err = Error::InvalidId {
            field: "fault ID",
            value: "abc".to_string(),
        };
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("fault ID"));
    }
}
