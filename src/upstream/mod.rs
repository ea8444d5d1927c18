//! Upstream repository access.
//!
//! # Data Flow
//! ```text
//! FilePath + UpstreamConfig
//!     → target.rs (contents API URL, per request)
//!     → client.rs (authenticated GET, status classification)
//!     → body text handed back to the handler
//! ```
//!
//! # Design Decisions
//! - The credential is injected, never read from ambient state mid-request
//! - Credential redaction lives in the type, not at each log site

pub mod client;
pub mod credential;
pub mod target;

pub use client::UpstreamClient;
pub use credential::Credential;
pub use target::UpstreamTarget;
