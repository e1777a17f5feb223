//! HTTP transport layer for the Gemini client.

pub mod endpoints;
mod error;
mod http;
mod reqwest;
mod request;

pub use error::TransportError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
pub use reqwest::ReqwestTransport;
pub use request::RequestBuilder;
