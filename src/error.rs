//! Error types for the BFF
//!
//! [`BffError`] classifies failures, [`to_error_response`] turns them into the
//! error envelope, and [`EndpointError`] applies each endpoint's status policy.

use std::any::Any;

use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::models::{ApiResponse, ErrorBody};
use crate::upstream::UpstreamError;

// == BFF Error Enum ==
/// Unified error type for request handling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BffError {
    /// The upstream provider failed
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// The request itself could not be extracted, e.g. a path segment
    /// that is not valid UTF-8
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// A failure carrying no usable description, such as a panic
    #[error("Unknown error")]
    Unknown,
}

// == Error Mapper ==
/// Builds the error payload for `err`.
///
/// Upstream status failures prefer the message from the upstream body over
/// the transport-level one and carry the upstream status and code. Transport
/// failures carry their code but no status.
pub fn to_error_response(err: &BffError) -> ErrorBody {
    match err {
        BffError::Upstream(UpstreamError::Status {
            status,
            message,
            code,
            body_message,
        }) => ErrorBody {
            message: body_message.clone().unwrap_or_else(|| message.clone()),
            code: code.clone(),
            status: Some(*status),
        },
        BffError::Upstream(UpstreamError::Transport { message, code }) => ErrorBody {
            message: message.clone(),
            code: code.clone(),
            status: None,
        },
        BffError::Upstream(UpstreamError::Other(message)) => ErrorBody::new(message.clone()),
        BffError::Rejected { status, message } => ErrorBody {
            message: message.clone(),
            code: None,
            status: Some(*status),
        },
        BffError::Unknown => ErrorBody::new("Unknown error"),
    }
}

impl From<PathRejection> for BffError {
    fn from(rejection: PathRejection) -> Self {
        BffError::Rejected {
            status: rejection.status().as_u16(),
            message: rejection.body_text(),
        }
    }
}

// == Endpoint Status Policy ==
/// Endpoints with distinct status-selection rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `GET /api/v1/characters`
    List,
    /// `GET /api/v1/characters/:id`
    Single,
}

impl Endpoint {
    /// Chooses the response status from the mapped upstream status.
    ///
    /// - List: any status >= 400 passes through, otherwise 502.
    /// - Single: a missing status counts as 500; 404 passes through; below
    ///   400 or exactly 500 becomes 502; any other status passes through.
    pub fn status_for(self, mapped: Option<u16>) -> StatusCode {
        let status = match self {
            Endpoint::List => match mapped {
                Some(s) if s >= 400 => s,
                _ => 502,
            },
            Endpoint::Single => match mapped.unwrap_or(500) {
                404 => 404,
                s if s < 400 || s == 500 => 502,
                s => s,
            },
        };

        StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY)
    }
}

// == Endpoint Error ==
/// A handler failure tagged with the endpoint that produced it.
#[derive(Debug)]
pub struct EndpointError {
    pub endpoint: Endpoint,
    pub error: BffError,
}

impl EndpointError {
    pub fn list(error: impl Into<BffError>) -> Self {
        Self {
            endpoint: Endpoint::List,
            error: error.into(),
        }
    }

    pub fn single(error: impl Into<BffError>) -> Self {
        Self {
            endpoint: Endpoint::Single,
            error: error.into(),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for EndpointError {
    fn into_response(self) -> Response {
        let body = to_error_response(&self.error);
        let status = self.endpoint.status_for(body.status);

        warn!(
            endpoint = ?self.endpoint,
            status = status.as_u16(),
            upstream_status = ?body.status,
            code = ?body.code,
            "request failed: {}",
            body.message
        );

        (status, Json(ApiResponse::<()>::failure(body))).into_response()
    }
}

// == Panic Recovery ==
/// Renders a panic caught by the HTTP layer as a 500 envelope.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "non-string panic payload".to_string()
    };
    error!(%detail, "handler panicked");

    let body = to_error_response(&BffError::Unknown);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<()>::failure(body)),
    )
        .into_response()
}

// == Result Type Alias ==
/// Convenience Result type for the BFF.
pub type Result<T> = std::result::Result<T, BffError>;
