//! `reqwest`-backed transport.

use super::{RequestOptions, Transport};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use serde_json::{Map, Value};
use std::fmt;
use tracing::{debug, error, warn};
use url::Url;

/// Base URL of the public Honeybadger v2 API.
pub const DEFAULT_BASE_URL: &str = "https://app.honeybadger.io/v2";

/// Connection settings for [`HttpTransport`].
#[derive(Clone)]
pub struct ClientConfig {
    /// Personal API token.
    pub api_token: String,
    /// API root, without a trailing slash.
    pub base_url: String,
}

impl ClientConfig {
    /// Settings for the public API with the given token.
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Transport issuing real HTTP requests.
pub struct HttpTransport {
    client: reqwest::Client,
    api_token: String,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport from connection settings.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidBaseUrl` if the base URL does not parse, or
    /// `Error::Transport` if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Url::parse(&config.base_url).map_err(|source| Error::InvalidBaseUrl {
            url: config.base_url.clone(),
            source,
        })?;

        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            api_token: config.api_token,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The API root requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers(options: &RequestOptions) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        for (name, value) in &options.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => warn!(header = %name, "Skipping invalid header override"),
            }
        }

        headers
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_with(&self, path: &str, options: &RequestOptions) -> Result<Value> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.api_token, None::<&str>)
            .headers(Self::headers(options))
            .send()
            .await
            .map_err(|e| {
                error!(%url, error = %e, "API request failed");
                Error::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = Error::Api {
                status: status.as_u16(),
                body,
            };
            error!(%url, error = %err, "API request failed");
            return Err(err);
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Object(Map::new()));
        }

        response.json::<Value>().await.map_err(|e| {
            error!(%url, error = %e, "API request failed");
            Error::Transport(e)
        })
    }
}
