//! Authenticated client for the upstream repository.
//!
//! # Responsibilities
//! - Issue exactly one GET per inbound request
//! - Attach the credential, raw-content accept header and client identifier
//! - Classify non-success statuses into [`ProxyError`] variants
//! - Buffer the body chunk by chunk up to a limit and decode it as UTF-8
//!
//! # Design Decisions
//! - No retries and no client timeout override; the caller retries on 5xx
//! - The authorization header value is marked sensitive
//! - Upstream error bodies are truncated before they reach the logs

use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;

use crate::config::UpstreamConfig;
use crate::error::ProxyError;
use crate::upstream::credential::Credential;
use crate::upstream::target::UpstreamTarget;

/// Media type asking GitHub for the raw file instead of JSON metadata.
pub const RAW_MEDIA_TYPE: &str = "application/vnd.github.v3.raw";

/// REST API version pinned on every request.
pub const GITHUB_API_VERSION: &str = "2022-11-28";

/// Longest upstream body excerpt kept for diagnostics, in characters.
pub const EXCERPT_MAX_CHARS: usize = 200;

/// Most bytes read from a non-success body.
pub const ERROR_BODY_MAX_BYTES: usize = 4 * 1024;

/// Thin wrapper over a pooled [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    max_body_bytes: usize,
}

impl UpstreamClient {
    /// Build a client from the upstream configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            http: builder.build()?,
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// Fetch the file behind `target` and return its text.
    pub async fn fetch(
        &self,
        target: &UpstreamTarget,
        credential: &Credential,
    ) -> Result<String, ProxyError> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", credential.expose()))
            .map_err(|_| {
                tracing::error!("Upstream credential contains characters invalid in a header");
                ProxyError::ConfigurationError
            })?;
        authorization.set_sensitive(true);

        let response = self
            .http
            .get(target.url().clone())
            .header(AUTHORIZATION, authorization)
            .header(ACCEPT, RAW_MEDIA_TYPE)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::error!(error = %e, "Upstream request failed");
                ProxyError::UnexpectedFailure(format!("Failed to fetch from GitHub: {}", e))
            })?;

        let status = response.status();
        tracing::info!(status = status.as_u16(), "Upstream responded");

        if !status.is_success() {
            // Only the generic failure path needs the body for diagnostics.
            let body = if is_auth_or_missing(status) {
                String::new()
            } else {
                read_error_prefix(response).await
            };
            return Err(classify_failure(status, target.relative_path(), &body));
        }

        if let Some(length) = response.content_length() {
            if length > self.max_body_bytes as u64 {
                return Err(too_large(self.max_body_bytes));
            }
        }

        let bytes = read_capped(response, self.max_body_bytes).await?;

        String::from_utf8(bytes).map_err(|_| {
            ProxyError::UnexpectedFailure("GitHub returned content that is not valid UTF-8".into())
        })
    }
}

/// Read the body chunk by chunk, failing as soon as it passes `limit`.
async fn read_capped(
    mut response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, ProxyError> {
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(|e| {
        let e = e.without_url();
        tracing::error!(error = %e, "Failed to read upstream body");
        ProxyError::UnexpectedFailure(format!("Failed to read GitHub response: {}", e))
    })? {
        if body.len() + chunk.len() > limit {
            return Err(too_large(limit));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// First [`ERROR_BODY_MAX_BYTES`] of an error body, or whatever arrived
/// before a read error.
async fn read_error_prefix(mut response: reqwest::Response) -> String {
    let mut body = Vec::new();
    while body.len() < ERROR_BODY_MAX_BYTES {
        match response.chunk().await {
            Ok(Some(chunk)) => body.extend_from_slice(&chunk),
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e.without_url(), "Failed to read upstream error body");
                break;
            }
        }
    }
    body.truncate(ERROR_BODY_MAX_BYTES);
    String::from_utf8_lossy(&body).into_owned()
}

fn is_auth_or_missing(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::NOT_FOUND | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
    )
}

fn too_large(limit: usize) -> ProxyError {
    ProxyError::UnexpectedFailure(format!("GitHub response exceeds {} bytes", limit))
}

/// Map a non-success upstream status to the matching error.
pub fn classify_failure(status: StatusCode, relative_path: &str, body: &str) -> ProxyError {
    match status {
        StatusCode::NOT_FOUND => ProxyError::NotFound {
            path: relative_path.to_string(),
        },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProxyError::UpstreamAuthFailure {
            status: status.as_u16(),
        },
        _ => ProxyError::UpstreamError {
            status: status.as_u16(),
            excerpt: excerpt(body, EXCERPT_MAX_CHARS),
        },
    }
}

/// First `max_chars` characters of `body`, marked when cut.
pub fn excerpt(body: &str, max_chars: usize) -> String {
    let body = body.trim();
    match body.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
