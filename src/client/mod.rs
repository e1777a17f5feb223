//! Client factory for the Gemini API.
//!
//! [`create_client`] turns an API key and a cancellation token into a
//! [`ServiceClient`]. [`ServiceClientBuilder`] exposes the same setup with
//! every knob, including injectable transport and logger for tests.

mod builder;
mod client;

pub use builder::ServiceClientBuilder;
pub use client::{create_client, create_client_from_env, create_client_with_config, ServiceClient};
