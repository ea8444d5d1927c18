//! Private repository data proxy.
//!
//! Serves files from a private GitHub repository over plain HTTP, holding
//! the access token server-side so callers never see it.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::ProxyConfig;
pub use error::ProxyError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use upstream::Credential;
