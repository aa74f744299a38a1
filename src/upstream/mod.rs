//! Upstream Module
//!
//! The character data provider this service wraps, behind the
//! [`CharacterSource`] trait so handlers and tests can swap implementations.

mod client;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Character;

pub use client::ThronesClient;
pub(crate) use client::is_dot_segment;

// == Upstream Error ==
/// Failure talking to the upstream provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// No response was received (connection refused, DNS, timeout)
    #[error("{message}")]
    Transport {
        message: String,
        code: Option<String>,
    },

    /// A response arrived with a non-success status
    #[error("{message}")]
    Status {
        status: u16,
        /// Transport-level description, e.g. "Request failed with status code 404"
        message: String,
        code: Option<String>,
        /// `message` field of a JSON error body, when present and non-empty
        body_message: Option<String>,
    },

    /// Anything else, such as an undecodable body
    #[error("{0}")]
    Other(String),
}

impl UpstreamError {
    /// Builds a status failure with the standard transport message and code.
    pub fn status(status: u16, body_message: Option<String>) -> Self {
        let code = match status {
            400..=499 => Some("ERR_BAD_REQUEST".to_string()),
            500..=599 => Some("ERR_BAD_RESPONSE".to_string()),
            _ => None,
        };

        Self::Status {
            status,
            message: format!("Request failed with status code {}", status),
            code,
            body_message,
        }
    }
}

// == Character Source ==
/// Read access to upstream character records.
///
/// Records are returned as received; normalization happens in the caller.
#[async_trait]
pub trait CharacterSource: Send + Sync {
    /// Fetch every character.
    async fn fetch_characters(&self) -> Result<Vec<Character>, UpstreamError>;

    /// Fetch one character by its raw path id.
    async fn fetch_character(&self, id: &str) -> Result<Character, UpstreamError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_codes() {
        let not_found = UpstreamError::status(404, Some("Not found".to_string()));
        assert_eq!(
            not_found,
            UpstreamError::Status {
                status: 404,
                message: "Request failed with status code 404".to_string(),
                code: Some("ERR_BAD_REQUEST".to_string()),
                body_message: Some("Not found".to_string()),
            }
        );

        match UpstreamError::status(503, None) {
            UpstreamError::Status { code, .. } => assert_eq!(code.as_deref(), Some("ERR_BAD_RESPONSE")),
            other => panic!("unexpected {:?}", other),
        }
        match UpstreamError::status(304, None) {
            UpstreamError::Status { code, .. } => assert!(code.is_none()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_display_uses_transport_message() {
        let err = UpstreamError::Transport {
            message: "Upstream down".to_string(),
            code: Some("ECONNREFUSED".to_string()),
        };
        assert_eq!(err.to_string(), "Upstream down");
        assert_eq!(
            UpstreamError::status(500, Some("ignored".to_string())).to_string(),
            "Request failed with status code 500"
        );
    }
}
