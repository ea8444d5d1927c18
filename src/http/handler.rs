//! The data request handler.
//!
//! One linear pass per request:
//!
//! ```text
//! resolve path → check credential → build target → single upstream GET
//!     → classify status → classify content → 200 + Cache-Control
//! ```
//!
//! Any failure short-circuits into a `ProxyError`, which renders as a JSON
//! error body. A request running past `timeouts.request_secs` is abandoned
//! and answered the same way. Nothing is retried and nothing outlives the
//! request.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
};
use std::time::Instant;
use tracing::Instrument;

use crate::error::ProxyError;
use crate::http::content::Payload;
use crate::http::path::{resolve_path, PATH_QUERY_PARAM};
use crate::http::request::RequestIdExt;
use crate::http::response::success_response;
use crate::http::server::AppState;
use crate::upstream::UpstreamTarget;

/// Axum entry point for `/api/data/...`. Any method is treated as a fetch.
pub async fn data_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let start_time = Instant::now();
    let request_id = headers.request_id().to_string();

    let structured: Vec<String> = match query {
        Ok(Query(pairs)) => pairs
            .into_iter()
            .filter(|(key, _)| key == PATH_QUERY_PARAM)
            .map(|(_, value)| value)
            .collect(),
        Err(e) => {
            tracing::debug!(request_id = %request_id, error = %e, "Ignoring unparsable query string");
            Vec::new()
        }
    };

    let span = tracing::info_span!("data_request", request_id = %request_id);
    async {
        tracing::info!(method = %method, path = %uri.path(), "Data request started");

        let outcome = tokio::time::timeout(
            state.request_timeout,
            handle(&state, &structured, uri.path()),
        )
        .await
        .unwrap_or_else(|_| {
            Err(ProxyError::UnexpectedFailure(
                "Timed out fetching from GitHub".to_string(),
            ))
        });

        let response = match outcome {
            Ok(payload) => success_response(payload, &state.cache_control),
            Err(err) => {
                if err.status().is_server_error() {
                    tracing::error!(error = %err, status = err.status().as_u16(), "Data request failed");
                } else {
                    tracing::warn!(error = %err, status = err.status().as_u16(), "Data request rejected");
                }
                err.into_response()
            }
        };

        tracing::info!(
            status = response.status().as_u16(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Data request completed"
        );
        response
    }
    .instrument(span)
    .await
}

/// Serve one file request.
///
/// `structured` holds the `path` query values, `raw_path` the request URL
/// path; see [`resolve_path`].
pub async fn handle(
    state: &AppState,
    structured: &[String],
    raw_path: &str,
) -> Result<Payload, ProxyError> {
    let path = resolve_path(structured, raw_path)?;
    tracing::debug!(
        file_path = %path.joined(),
        from_query = !structured.is_empty(),
        "Resolved file path"
    );

    let credential = state.credential.as_ref().ok_or_else(|| {
        tracing::error!(
            token_env = %state.upstream_config.token_env,
            "Upstream credential missing, refusing to call upstream"
        );
        ProxyError::ConfigurationError
    })?;

    let target = UpstreamTarget::new(&state.upstream_config, &path)?;
    tracing::debug!(url = %target, "Fetching from upstream");

    let text = state.client.fetch(&target, credential).await?;

    let payload = Payload::classify(text);
    tracing::info!(
        kind = payload.kind().as_str(),
        bytes = payload.len(),
        "Classified upstream content"
    );
    Ok(payload)
}
