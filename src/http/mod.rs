//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing layers)
//!     → handler.rs (one linear pass per request)
//!         → path.rs (resolve file path)
//!         → upstream (authenticated fetch)
//!         → content.rs (JSON vs. text)
//!     → response.rs (200 + Cache-Control) or ProxyError (JSON error body)
//!     → Send to client
//! ```

pub mod content;
pub mod handler;
pub mod path;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdExt, UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
