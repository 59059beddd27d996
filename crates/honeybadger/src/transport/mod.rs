//! HTTP access layer for the Honeybadger API.
//!
//! The [`Transport`] trait is the seam between the typed accessors in
//! [`crate::api`] and the network. It exposes a single verb, `GET`: the
//! client is read-only and there is deliberately no way to issue any other
//! method through it.
//!
//! Implementations must:
//! - send the API token as HTTP Basic credentials (token as username, empty password)
//! - send `Accept: application/json`
//! - turn `204 No Content` into an empty JSON object
//! - turn any non-2xx status into [`Error::Api`](crate::Error::Api) carrying the raw body
//! - never retry

mod http;

pub use http::{ClientConfig, DEFAULT_BASE_URL, HttpTransport};

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;

/// Flat string-keyed query filters (e.g. `q`, `limit`).
pub type QueryParams = BTreeMap<String, String>;

/// Per-request overrides.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra headers, applied after the defaults so they can replace them.
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    /// Add a header override.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Authenticated, read-only access to the upstream REST API.
#[async_trait]
pub trait Transport: Send + Sync {
    /// `GET` a path relative to the base URL, with request overrides.
    ///
    /// `path` already contains any query string.
    ///
    /// # Errors
    ///
    /// Returns `Error::Api` for non-2xx responses, `Error::Transport` for
    /// network failures and `Error::Json` for undecodable bodies.
    async fn get_with(&self, path: &str, options: &RequestOptions) -> Result<Value>;

    /// `GET` a path relative to the base URL.
    ///
    /// # Errors
    ///
    /// See [`Transport::get_with`].
    async fn get(&self, path: &str) -> Result<Value> {
        self.get_with(path, &RequestOptions::default()).await
    }
}

/// Append URL-encoded query parameters to `path`.
///
/// Returns `path` unchanged when `params` is empty.
#[must_use]
pub fn with_query(path: &str, params: &QueryParams) -> String {
    if params.is_empty() {
        return path.to_string();
    }

    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish();
    format!("{path}?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_query_empty_params() {
        assert_eq!(
            with_query("/projects/1/faults", &QueryParams::new()),
            "/projects/1/faults"
        );
    }

    #[test]
    fn test_with_query_encodes_values() {
        let mut params = QueryParams::new();
        params.insert(
            "q".to_string(),
            "is:unresolved environment:production".to_string(),
        );
        params.insert("limit".to_string(), "25".to_string());

        assert_eq!(
            with_query("/projects/1/faults", &params),
            "/projects/1/faults?limit=25&q=is%3Aunresolved+environment%3Aproduction"
        );
    }

    #[test]
    fn test_request_options_builder() {
        let options = RequestOptions::default().with_header("X-Trace", "abc");
        assert_eq!(options.headers, vec![("X-Trace".to_string(), "abc".to_string())]);
    }
}
