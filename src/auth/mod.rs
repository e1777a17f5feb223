//! API key placement for Gemini requests.

use secrecy::{ExposeSecret, SecretString};

use crate::config::{AuthMethod, ClientConfig};
use crate::error::SetupError;

/// Header carrying the API key when `AuthMethod::Header` is used.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Query parameter carrying the API key when `AuthMethod::QueryParam` is used.
pub const API_KEY_QUERY_PARAM: &str = "key";

/// Checks that `api_key` can be sent in the `x-goog-api-key` header.
///
/// # Errors
///
/// Returns `SetupError::InvalidConfiguration` for keys containing control
/// characters or other bytes a header value cannot carry. The key itself is
/// not included in the message.
pub fn validate_api_key(api_key: &SecretString) -> Result<(), SetupError> {
    reqwest::header::HeaderValue::from_str(api_key.expose_secret())
        .map(|_| ())
        .map_err(|_| SetupError::InvalidConfiguration {
            message: "API key contains characters that are not valid in an HTTP header"
                .to_string(),
        })
}

/// Supplies credentials for outgoing requests.
pub trait AuthManager: Send + Sync {
    /// Get the authentication header name and value.
    fn get_auth_header(&self) -> Option<(String, String)>;

    /// Get the authentication query parameter.
    fn get_auth_query_param(&self) -> Option<(String, String)>;
}

/// API key authentication manager.
pub struct ApiKeyAuthManager {
    api_key: SecretString,
    auth_method: AuthMethod,
}

impl ApiKeyAuthManager {
    /// Create a new API key auth manager.
    pub fn new(api_key: SecretString, auth_method: AuthMethod) -> Self {
        Self { api_key, auth_method }
    }

    /// Create from config.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_key.clone(), config.auth_method)
    }
}

impl std::fmt::Debug for ApiKeyAuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyAuthManager")
            .field("api_key", &"<redacted>")
            .field("auth_method", &self.auth_method)
            .finish()
    }
}

impl AuthManager for ApiKeyAuthManager {
    fn get_auth_header(&self) -> Option<(String, String)> {
        match self.auth_method {
            AuthMethod::Header => Some((
                API_KEY_HEADER.to_string(),
                self.api_key.expose_secret().clone(),
            )),
            AuthMethod::QueryParam => None,
        }
    }

    fn get_auth_query_param(&self) -> Option<(String, String)> {
        match self.auth_method {
            AuthMethod::QueryParam => Some((
                API_KEY_QUERY_PARAM.to_string(),
                self.api_key.expose_secret().clone(),
            )),
            AuthMethod::Header => None,
        }
    }
}
