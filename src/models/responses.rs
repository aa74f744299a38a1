//! Response envelope for the BFF API
//!
//! Every endpoint answers with `{ ok, data | error, pagination? }`.

use serde::{Deserialize, Serialize};

/// Page metadata attached to paginated list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Number of items after filtering
    pub total: usize,
    /// Effective 1-based page number
    pub page: usize,
    /// Effective page size, in [1, 100]
    pub page_size: usize,
    /// max(1, ceil(total / page_size))
    pub total_pages: usize,
}

/// Error payload of a failed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable description
    pub message: String,
    /// Transport or classification code, e.g. `ECONNREFUSED`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Upstream HTTP status, when a response was received
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorBody {
    /// Creates an ErrorBody carrying only a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            status: None,
        }
    }
}

/// The uniform response envelope.
///
/// Build it through [`ApiResponse::success`], [`ApiResponse::paginated`] or
/// [`ApiResponse::failure`] so that `ok` always agrees with `data`/`error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> ApiResponse<T> {
    /// Successful response without pagination metadata
    pub fn success(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
            pagination: None,
        }
    }

    /// Successful response, with pagination metadata when present
    pub fn paginated(data: T, pagination: Option<Pagination>) -> Self {
        Self {
            pagination,
            ..Self::success(data)
        }
    }

    /// Failed response
    pub fn failure(error: ErrorBody) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error),
            pagination: None,
        }
    }
}

/// Payload of the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Always "healthy" while the process serves requests
    pub status: String,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}
