//! Builder for creating `ServiceClient` instances.

use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::auth::{validate_api_key, ApiKeyAuthManager, AuthManager};
use crate::config::{parse_base_url, AuthMethod, ClientConfig, LogLevel};
use crate::error::SetupError;
use crate::observability::{Logger, StructuredLogger};
use crate::transport::{HttpTransport, ReqwestTransport};

use super::client::ServiceClient;

/// Builder for creating a `ServiceClient`.
///
/// # Example
///
/// ```no_run
/// use integrations_gemini_setup::ServiceClientBuilder;
/// use secrecy::SecretString;
/// use std::time::Duration;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let cancel = CancellationToken::new();
/// let client = ServiceClientBuilder::new()
///     .api_key(SecretString::new("your-api-key".into()))
///     .timeout(Duration::from_secs(60))
///     .verify_credentials(true)
///     .connect(&cancel)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ServiceClientBuilder {
    api_key: Option<SecretString>,
    base_url: Option<Url>,
    api_version: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    auth_method: Option<AuthMethod>,
    log_level: Option<LogLevel>,
    verify_credentials: Option<bool>,

    // Injectable dependencies for testing
    transport: Option<Arc<dyn HttpTransport>>,
    auth_manager: Option<Arc<dyn AuthManager>>,
    logger: Option<Arc<dyn Logger>>,
}

impl ServiceClientBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder from an existing configuration.
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            api_key: Some(config.api_key),
            base_url: Some(config.base_url),
            api_version: Some(config.api_version),
            timeout: Some(config.timeout),
            connect_timeout: Some(config.connect_timeout),
            auth_method: Some(config.auth_method),
            log_level: Some(config.log_level),
            verify_credentials: Some(config.verify_credentials),
            transport: None,
            auth_manager: None,
            logger: None,
        }
    }

    /// Sets the API key.
    pub fn api_key(mut self, key: SecretString) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the base URL for the API.
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the base URL from a string.
    pub fn base_url_str(mut self, url: &str) -> Result<Self, SetupError> {
        self.base_url = Some(parse_base_url(url)?);
        Ok(self)
    }

    /// Sets the API version.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, duration: Duration) -> Self {
        self.connect_timeout = Some(duration);
        self
    }

    /// Sets the authentication method.
    pub fn auth_method(mut self, method: AuthMethod) -> Self {
        self.auth_method = Some(method);
        self
    }

    /// Sets the log level of the default logger.
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Check the key against the service before returning the client.
    pub fn verify_credentials(mut self, verify: bool) -> Self {
        self.verify_credentials = Some(verify);
        self
    }

    /// Sets a custom HTTP transport (for testing).
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets a custom auth manager (for testing).
    ///
    /// Overrides where the key goes on each request. The configured key is
    /// still required and validated.
    pub fn auth_manager(mut self, auth_manager: Arc<dyn AuthManager>) -> Self {
        self.auth_manager = Some(auth_manager);
        self
    }

    /// Sets a custom logger (for testing).
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Builds the client, giving up as soon as `cancel` fires.
    ///
    /// Every call performs a fresh setup; nothing is cached between calls
    /// and nothing is retried.
    ///
    /// # Errors
    ///
    /// - `SetupError::Cancelled` if the token is or becomes cancelled,
    ///   whatever the key.
    /// - `SetupError::MissingApiKey` for an absent, empty or blank key.
    /// - `SetupError::InvalidConfiguration` for a key that cannot be sent as
    ///   a header value, or for invalid settings.
    /// - `SetupError::Transport` if the HTTP client cannot be created or the
    ///   credential check cannot reach the service.
    /// - `SetupError::Unauthenticated` / `SetupError::Rejected` if the
    ///   credential check is enabled and the service refuses the key.
    pub async fn connect(self, cancel: &CancellationToken) -> Result<ServiceClient, SetupError> {
        if cancel.is_cancelled() {
            return Err(SetupError::Cancelled);
        }

        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(SetupError::Cancelled),
            result = self.setup() => result,
        }
    }

    async fn setup(self) -> Result<ServiceClient, SetupError> {
        let Self {
            api_key,
            base_url,
            api_version,
            timeout,
            connect_timeout,
            auth_method,
            log_level,
            verify_credentials,
            transport,
            auth_manager,
            logger,
        } = self;

        let api_key = api_key
            .filter(|key| !key.expose_secret().trim().is_empty())
            .ok_or(SetupError::MissingApiKey)?;
        validate_api_key(&api_key)?;

        let mut config = ClientConfig::builder().api_key(api_key);
        if let Some(url) = base_url {
            config = config.base_url(url.as_str())?;
        }
        if let Some(version) = api_version {
            config = config.api_version(&version);
        }
        if let Some(timeout) = timeout {
            config = config.timeout(timeout);
        }
        if let Some(connect_timeout) = connect_timeout {
            config = config.connect_timeout(connect_timeout);
        }
        if let Some(method) = auth_method {
            config = config.auth_method(method);
        }
        if let Some(level) = log_level {
            config = config.log_level(level);
        }
        if let Some(verify) = verify_credentials {
            config = config.verify_credentials(verify);
        }
        let config = config.build()?;

        let transport: Arc<dyn HttpTransport> = match transport {
            Some(t) => t,
            None => Arc::new(ReqwestTransport::new(config.timeout, config.connect_timeout)?),
        };

        let logger: Arc<dyn Logger> = logger.unwrap_or_else(|| {
            Arc::new(StructuredLogger::new("gemini").with_level(config.log_level))
        });

        let auth_manager: Arc<dyn AuthManager> = auth_manager
            .unwrap_or_else(|| Arc::new(ApiKeyAuthManager::from_config(&config)));
        let client = ServiceClient::from_parts(config, transport, auth_manager, logger);

        if client.config().verify_credentials {
            client.verify_credentials().await?;
        }

        client.logger().info(
            "Gemini client initialized",
            serde_json::json!({
                "base_url": client.config().base_url.as_str(),
                "api_version": client.config().api_version,
                "auth_method": format!("{:?}", client.config().auth_method),
                "verified": client.config().verify_credentials,
            }),
        );

        Ok(client)
    }
}

impl std::fmt::Debug for ServiceClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceClientBuilder")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .field("api_version", &self.api_version)
            .field("verify_credentials", &self.verify_credentials)
            .finish_non_exhaustive()
    }
}
