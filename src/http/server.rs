//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the data and health handlers
//! - Wire up middleware (request ID, tracing)
//! - Bind server to listener
//! - Stop on the shutdown broadcast

use axum::{
    http::HeaderValue,
    routing::{any, get},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{ProxyConfig, UpstreamConfig};
use crate::http::handler::data_handler;
use crate::http::path::DATA_ROUTE_PREFIX;
use crate::http::request::UuidRequestId;
use crate::upstream::{Credential, UpstreamClient};

/// Application state injected into handlers.
///
/// Everything here is immutable after startup; clones share it.
#[derive(Clone)]
pub struct AppState {
    pub upstream_config: Arc<UpstreamConfig>,
    pub credential: Option<Credential>,
    pub client: UpstreamClient,
    pub cache_control: HeaderValue,
    /// Deadline for serving one data request, upstream call included.
    pub request_timeout: Duration,
}

/// HTTP server for the data proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server.
    ///
    /// A missing `credential` does not fail startup; each data request then
    /// answers with a configuration error instead.
    pub fn new(
        config: ProxyConfig,
        credential: Option<Credential>,
    ) -> Result<Self, reqwest::Error> {
        let client = UpstreamClient::new(&config.upstream)?;
        let cache_control = HeaderValue::from_str(&config.cache.header_value())
            .unwrap_or_else(|_| HeaderValue::from_static("s-maxage=3600, stale-while-revalidate"));

        let state = AppState {
            upstream_config: Arc::new(config.upstream.clone()),
            credential,
            client,
            cache_control,
            request_timeout: Duration::from_secs(config.timeouts.request_secs),
        };

        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let prefix = DATA_ROUTE_PREFIX;
        Router::new()
            .route(prefix, any(data_handler))
            .route(&format!("{}/", prefix), any(data_handler))
            .route(&format!("{}/{{*path}}", prefix), any(data_handler))
            .route("/health", get(health))
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            owner = %self.config.upstream.owner,
            repository = %self.config.upstream.repository,
            branch = %self.config.upstream.branch,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Router with all layers, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn server(credential: Option<&str>) -> HttpServer {
        let mut config = ProxyConfig::default();
        // Unroutable; these tests must never reach upstream.
        config.upstream.api_base = "http://127.0.0.1:1".into();
        config.upstream.use_system_proxy = false;
        HttpServer::new(config, credential.and_then(Credential::new)).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = server(None)
            .router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_missing_path_is_bad_request() {
        for uri in ["/api/data", "/api/data/"] {
            let response = server(Some("token"))
                .router()
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri = {}", uri);
            let body = json_body(response).await;
            assert_eq!(body["error"], "Invalid path parameter");
        }
    }

    #[tokio::test]
    async fn test_missing_credential_is_configuration_error() {
        let response = server(None)
            .router()
            .oneshot(
                Request::get("/api/data/en/version.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(
            body,
            serde_json::json!({
                "error": "Server configuration error",
                "details": "GitHub token not configured"
            })
        );
    }

    #[tokio::test]
    async fn test_caller_request_id_is_propagated() {
        let response = server(None)
            .router()
            .oneshot(
                Request::get("/health")
                    .header("x-request-id", "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()["x-request-id"], "req-42");
    }
}
