//! Observability for the Gemini client.
//!
//! Logging goes through the [`Logger`] trait so tests can swap in a
//! [`NoopLogger`]. [`StructuredLogger`] forwards to `tracing`.
//!
//! ```rust
//! use integrations_gemini_setup::observability::{Logger, StructuredLogger};
//! use integrations_gemini_setup::config::LogLevel;
//! use serde_json::json;
//!
//! let logger = StructuredLogger::new("gemini.client").with_level(LogLevel::Debug);
//! logger.info("Client ready", json!({ "api_version": "v1beta" }));
//! ```

pub mod logging;

pub use logging::{Logger, NoopLogger, StructuredLogger};
