//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.
//! The upstream secret is deliberately absent: it comes from the environment
//! variable named by [`UpstreamConfig::token_env`].

use serde::{Deserialize, Serialize};

/// Root configuration for the data proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream repository settings.
    pub upstream: UpstreamConfig,

    /// Cache directive emitted on successful responses.
    pub cache: CacheConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Private repository the proxy reads from.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the GitHub REST API.
    pub api_base: String,

    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub repository: String,

    /// Branch (or any git ref) to read files from.
    pub branch: String,

    /// Name of the environment variable holding the access token.
    pub token_env: String,

    /// Value of the `User-Agent` header sent upstream.
    pub user_agent: String,

    /// Largest upstream body the proxy will buffer, in bytes.
    pub max_body_bytes: usize,

    /// Honor `HTTP_PROXY`/`HTTPS_PROXY` for outbound requests.
    pub use_system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            owner: "kiwidiwi".to_string(),
            repository: "vlm-liturgical-data".to_string(),
            branch: "main".to_string(),
            token_env: "GITHUB_PAT".to_string(),
            user_agent: "vlm-data-proxy".to_string(),
            max_body_bytes: 10 * 1024 * 1024, // 10MB
            use_system_proxy: true,
        }
    }
}

/// Shared-cache directive for successful responses.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// `s-maxage` value in seconds.
    pub s_maxage_secs: u64,

    /// Append `stale-while-revalidate`.
    pub stale_while_revalidate: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            s_maxage_secs: 3600,
            stale_while_revalidate: true,
        }
    }
}

impl CacheConfig {
    /// Render the `Cache-Control` header value.
    pub fn header_value(&self) -> String {
        if self.stale_while_revalidate {
            format!("s-maxage={}, stale-while-revalidate", self.s_maxage_secs)
        } else {
            format!("s-maxage={}", self.s_maxage_secs)
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Inbound request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines instead of the human-readable format.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
