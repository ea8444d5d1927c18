//! Error taxonomy for the data proxy.
//!
//! Every failure on the request path is a [`ProxyError`]. The handler never
//! lets one escape as a fault: each variant maps to a status code and a
//! `{ "error", "details" }` JSON body via [`IntoResponse`].
//!
//! # Design Decisions
//! - Upstream bodies and transport errors stay in logs; variants carry only
//!   what is safe to show a caller
//! - Nothing here is retried; callers retry on 5xx

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors produced while serving a data request.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Missing or malformed file path.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Upstream credential is not configured.
    #[error("upstream credential not configured")]
    ConfigurationError,

    /// Upstream has no file at the given path.
    #[error("file not found at path: {path}")]
    NotFound { path: String },

    /// Upstream rejected the credential (401/403).
    #[error("upstream rejected credential (status {status})")]
    UpstreamAuthFailure { status: u16 },

    /// Any other non-success upstream status.
    #[error("upstream returned status {status}: {excerpt}")]
    UpstreamError { status: u16, excerpt: String },

    /// Transport failure, unreadable body or any other unexpected condition.
    #[error("{0}")]
    UnexpectedFailure(String),
}

/// JSON body for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub details: String,
}

impl ProxyError {
    /// HTTP status returned to the caller.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::InvalidPath(_) => StatusCode::BAD_REQUEST,
            ProxyError::NotFound { .. } => StatusCode::NOT_FOUND,
            ProxyError::ConfigurationError
            | ProxyError::UpstreamAuthFailure { .. }
            | ProxyError::UpstreamError { .. }
            | ProxyError::UnexpectedFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short error label for the `error` field.
    pub fn message(&self) -> &'static str {
        match self {
            ProxyError::InvalidPath(_) => "Invalid path parameter",
            ProxyError::ConfigurationError => "Server configuration error",
            ProxyError::NotFound { .. } => "File not found",
            ProxyError::UpstreamAuthFailure { .. } => "Authentication failed",
            ProxyError::UpstreamError { .. } | ProxyError::UnexpectedFailure(_) => {
                "Failed to load data"
            }
        }
    }

    /// Caller-facing diagnostic for the `details` field.
    ///
    /// The upstream excerpt of [`ProxyError::UpstreamError`] is deliberately
    /// left out; it only reaches the logs.
    pub fn details(&self) -> String {
        match self {
            ProxyError::InvalidPath(reason) => reason.clone(),
            ProxyError::ConfigurationError => "GitHub token not configured".to_string(),
            ProxyError::NotFound { path } => format!("File not found at path: {}", path),
            ProxyError::UpstreamAuthFailure { .. } => {
                "Invalid or missing GitHub token".to_string()
            }
            ProxyError::UpstreamError { status, .. } => {
                format!("Failed to fetch from GitHub: {}", status_line(*status))
            }
            ProxyError::UnexpectedFailure(message) => message.clone(),
        }
    }

    /// Error body sent to the caller.
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.message(),
            details: self.details(),
        }
    }
}

fn status_line(status: u16) -> String {
    match StatusCode::from_u16(status) {
        Ok(code) => match code.canonical_reason() {
            Some(reason) => format!("{} {}", status, reason),
            None => status.to_string(),
        },
        Err(_) => status.to_string(),
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
