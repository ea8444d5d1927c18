//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handler, upstream client, server
//!     → tracing events (request_id span, decision points, elapsed time)
//!     → logging.rs subscriber (stdout, text or JSON)
//! ```
//!
//! # Design Decisions
//! - Structured fields, never interpolated secrets
//! - Request ID flows through every event of a request via its span

pub mod logging;

pub use logging::init_logging;
