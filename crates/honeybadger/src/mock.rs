//! In-memory [`Transport`] for tests.
//!
//! Available under `#[cfg(test)]` and with the `test-util` feature:
//!
//! ```toml
//! [dev-dependencies]
//! honeybadger = { version = "...", features = ["test-util"] }
//! ```
//!
//! Responses are registered per exact path (including the query string).
//! Unregistered paths answer with an upstream 404, mirroring what the real
//! API does for unknown resources. Every requested path is recorded so tests
//! can assert which calls were (or were not) made.

use crate::error::{Error, Result};
use crate::transport::{RequestOptions, Transport};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Clone)]
enum MockResponse {
    Json(Value),
    Status { status: u16, body: String },
}

/// Canned-response transport that records every request.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: HashMap<String, MockResponse>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    /// Create a transport with no registered responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `path` with a JSON body.
    #[must_use]
    pub fn respond(mut self, path: impl Into<String>, body: Value) -> Self {
        self.responses.insert(path.into(), MockResponse::Json(body));
        self
    }

    /// Answer `path` with a non-2xx status and raw body.
    #[must_use]
    pub fn fail(mut self, path: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        self.responses.insert(
            path.into(),
            MockResponse::Status {
                status,
                body: body.into(),
            },
        );
        self
    }

    /// Paths requested so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of requests made to `path`.
    #[must_use]
    pub fn request_count(&self, path: &str) -> usize {
        self.requests().iter().filter(|p| *p == path).count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get_with(&self, path: &str, _options: &RequestOptions) -> Result<Value> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());

        match self.responses.get(path) {
            Some(MockResponse::Json(body)) => Ok(body.clone()),
            Some(MockResponse::Status { status, body }) => Err(Error::Api {
                status: *status,
                body: body.clone(),
            }),
            None => Err(Error::Api {
                status: 404,
                body: r#"{"errors":"Not found"}"#.to_string(),
            }),
        }
    }
}
