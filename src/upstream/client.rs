//! Thrones API client
//!
//! Fetches characters from `{base}/api/v2/Characters` using [`reqwest`].

use std::error::Error as _;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{CharacterSource, UpstreamError};
use crate::models::Character;

/// HTTP client for the Thrones API.
#[derive(Debug, Clone)]
pub struct ThronesClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ThronesClient {
    /// Creates a client whose requests time out after `timeout`.
    ///
    /// * `base_url` - e.g. `https://thronesapi.com`; may carry a path prefix.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Self::with_client(client, base_url)
    }

    /// Creates a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| UpstreamError::Other(format!("Invalid upstream URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::Other(format!(
                "Invalid upstream URL '{}': cannot be a base",
                base_url
            )));
        }

        Ok(Self { client, base_url })
    }

    /// Builds `{base}/api/v2/Characters[/{id}]`, percent-encoding the id.
    fn characters_url(&self, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["api", "v2", "Characters"]);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, UpstreamError> {
        debug!(%url, "upstream request");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::status(status.as_u16(), body_message(&body)));
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&bytes)
            .map_err(|e| UpstreamError::Other(format!("Invalid upstream response: {}", e)))
    }
}

#[async_trait]
impl CharacterSource for ThronesClient {
    async fn fetch_characters(&self) -> Result<Vec<Character>, UpstreamError> {
        self.get_json(self.characters_url(None)).await
    }

    async fn fetch_character(&self, id: &str) -> Result<Character, UpstreamError> {
        // "." and ".." cannot be sent as a path segment, they would resolve
        // to the list URL
        if is_dot_segment(id) {
            debug!(id, "dot-segment id treated as not found");
            return Err(UpstreamError::status(404, None));
        }
        self.get_json(self.characters_url(Some(id))).await
    }
}

// == Error Classification ==
fn transport_error(err: reqwest::Error) -> UpstreamError {
    let code = if err.is_timeout() {
        "ETIMEDOUT"
    } else if err.is_connect() {
        "ECONNREFUSED"
    } else {
        "ERR_NETWORK"
    };

    // Include the source chain; the top-level message omits the cause
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    UpstreamError::Transport {
        message,
        code: Some(code.to_string()),
    }
}

/// True for ids that URL normalization would drop or resolve.
pub(crate) fn is_dot_segment(id: &str) -> bool {
    matches!(id, "." | "..")
}

/// Extracts a non-empty `message` string from a JSON error body.
fn body_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
