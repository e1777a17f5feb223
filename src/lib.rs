//! # Gemini client setup
//!
//! Builds a client for the Google Gemini (Generative AI) API and hands out
//! model handles that carry a fixed set of safety overrides.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use integrations_gemini_setup::{configure_model, create_client};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cancel = CancellationToken::new();
//!     let client = create_client("your-api-key", &cancel).await?;
//!
//!     let model = configure_model(&client, "gemini-pro");
//!     assert_eq!(model.safety_settings().len(), 3);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - `client` - Client factory and the `ServiceClient` handle
//! - `model` - Model configurator and the `ModelHandle` type
//! - `config` - Configuration types and builder
//! - `auth` - API key placement
//! - `transport` - HTTP transport layer
//! - `error` - Error types and taxonomy
//! - `types` - Wire types (safety settings, content, generation)
//! - `observability` - Structured logging

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod observability;
pub mod transport;
pub mod types;

// Development/testing modules - always available for integration tests
pub mod fixtures;
pub mod mocks;

pub use auth::{ApiKeyAuthManager, AuthManager};
pub use client::{
    create_client, create_client_from_env, create_client_with_config, ServiceClient,
    ServiceClientBuilder,
};
pub use config::{
    AuthMethod, ClientConfig, ClientConfigBuilder, LogLevel, DEFAULT_API_VERSION,
    DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS,
};
pub use error::{
    AuthenticationError, GeminiError, GeminiResult, NetworkError, RateLimitError, RequestError,
    ResourceError, ResponseError, ServerError, SetupError, ValidationDetail,
};
pub use model::{configure_model, ModelHandle, BLOCK_NONE_SAFETY_SETTINGS};
pub use observability::{Logger, NoopLogger, StructuredLogger};
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};
pub use types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    HarmBlockThreshold, HarmCategory, HarmProbability, Part, Role, SafetyRating, SafetySetting,
};
