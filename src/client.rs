//! BFF Client
//!
//! Typed consumer of the BFF API, mirroring what the browser UI does: build
//! the query string from the optional search parameters, call the endpoint,
//! and turn an `ok: false` envelope into an error.

use reqwest::Url;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::api::API_PREFIX;
use crate::models::{ApiResponse, Character, HealthStatus};
use crate::query::{SortField, SortOrder};
use crate::upstream::is_dot_segment;

// == Client Error ==
#[derive(Error, Debug)]
pub enum ClientError {
    /// The BFF answered with `ok: false`
    #[error("{0}")]
    Api(String),

    /// The request failed or the body was not an envelope
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid BFF URL '{0}'")]
    InvalidUrl(String),

    /// The id would be resolved away as a URL dot segment
    #[error("Invalid character id '{0}'")]
    InvalidId(String),
}

/// Search parameters for the character list. `None` and empty values are
/// left out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub q: Option<String>,
    pub family: Option<String>,
    pub title: Option<String>,
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortOrder>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl SearchParams {
    /// Query-string pairs in a fixed order, skipping unset and empty values.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let candidates = [
            ("q", self.q.clone()),
            ("family", self.family.clone()),
            ("title", self.title.clone()),
            ("sortBy", self.sort_by.map(|f| f.as_str().to_string())),
            ("sortOrder", self.sort_order.map(|o| o.as_str().to_string())),
            ("page", self.page.map(|p| p.to_string())),
            ("pageSize", self.page_size.map(|s| s.to_string())),
        ];

        candidates
            .into_iter()
            .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| (key, v)))
            .collect()
    }
}

/// One page of search results. Page metadata is `None` when the request
/// did not ask for pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharactersPage {
    pub items: Vec<Character>,
    pub total: Option<usize>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub total_pages: Option<usize>,
}

/// HTTP client for a running BFF.
#[derive(Debug, Clone)]
pub struct BffClient {
    client: reqwest::Client,
    base_url: Url,
}

impl BffClient {
    /// * `base_url` - e.g. `http://localhost:4000`
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, ClientError> {
        let url = Url::parse(base_url).map_err(|_| ClientError::InvalidUrl(base_url.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            client,
            base_url: url,
        })
    }

    /// `GET /api/v1/characters` with the given parameters.
    pub async fn search_characters(
        &self,
        params: &SearchParams,
    ) -> Result<CharactersPage, ClientError> {
        let url = self.endpoint(&["characters"]);
        let envelope: ApiResponse<Vec<Character>> = self
            .send(self.client.get(url).query(&params.to_query_pairs()))
            .await?;

        let pagination = envelope.pagination;
        let items = expect_ok(envelope)?;
        Ok(CharactersPage {
            items,
            total: pagination.map(|p| p.total),
            page: pagination.map(|p| p.page),
            page_size: pagination.map(|p| p.page_size),
            total_pages: pagination.map(|p| p.total_pages),
        })
    }

    /// `GET /api/v1/characters/:id`
    pub async fn get_character(&self, id: &str) -> Result<Character, ClientError> {
        if is_dot_segment(id) {
            return Err(ClientError::InvalidId(id.to_string()));
        }
        let url = self.endpoint(&["characters", id]);
        let envelope: ApiResponse<Character> = self.send(self.client.get(url)).await?;
        expect_ok(envelope)
    }

    /// `GET /api/v1/health`, returning the reported status.
    pub async fn health(&self) -> Result<String, ClientError> {
        let url = self.endpoint(&["health"]);
        let envelope: ApiResponse<HealthStatus> =
            self.send(self.client.get(url)).await?;
        Ok(expect_ok(envelope)?.status)
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(API_PREFIX.split('/').filter(|s| !s.is_empty()))
                .extend(segments);
        }
        url
    }

    /// Sends the request and decodes the envelope whatever the status.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<ApiResponse<T>, ClientError> {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status().as_u16();

        // A missing error status falls back to the HTTP status
        let mut envelope: ApiResponse<T> = response.json().await?;
        if let Some(error) = envelope.error.as_mut() {
            error.status.get_or_insert(status);
        }
        Ok(envelope)
    }
}

/// Unwraps `data`, turning a failed envelope into [`ClientError::Api`].
fn expect_ok<T>(envelope: ApiResponse<T>) -> Result<T, ClientError> {
    match (envelope.ok, envelope.data) {
        (true, Some(data)) => Ok(data),
        _ => {
            let error = envelope.error;
            let message = error
                .as_ref()
                .map(|e| e.message.clone())
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| {
                    match error.as_ref().and_then(|e| e.status) {
                        Some(status) => format!("Request failed with status {}", status),
                        None => "Request failed".to_string(),
                    }
                });
            Err(ClientError::Api(message))
        }
    }
}
