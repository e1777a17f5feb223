//! The `ServiceClient` handle and factory functions.

use secrecy::SecretString;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::auth::AuthManager;
use crate::config::ClientConfig;
use crate::error::{map_setup_status, SetupError};
use crate::model::{configure_model, ModelHandle};
use crate::observability::Logger;
use crate::transport::{endpoints, HttpMethod, HttpTransport, RequestBuilder};

use super::builder::ServiceClientBuilder;

/// Handle to the Gemini service.
///
/// Owns the resolved configuration, the HTTP transport and the credentials.
/// Model handles borrow it, so it has to outlive every handle configured
/// from it. Dropping it releases the underlying connection pool.
pub struct ServiceClient {
    config: ClientConfig,
    transport: Arc<dyn HttpTransport>,
    requests: RequestBuilder,
    logger: Arc<dyn Logger>,
}

impl ServiceClient {
    /// Creates a new client builder.
    pub fn builder() -> ServiceClientBuilder {
        ServiceClientBuilder::new()
    }

    pub(super) fn from_parts(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
        auth_manager: Arc<dyn AuthManager>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        let requests = RequestBuilder::new(
            config.base_url.clone(),
            config.api_version.clone(),
            auth_manager,
        );
        Self {
            config,
            transport,
            requests,
            logger,
        }
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns a model handle with the fixed safety settings applied.
    ///
    /// Same as [`configure_model`].
    pub fn generative_model(&self, model: &str) -> ModelHandle<'_> {
        configure_model(self, model)
    }

    pub(crate) fn transport(&self) -> &dyn HttpTransport {
        self.transport.as_ref()
    }

    pub(crate) fn requests(&self) -> &RequestBuilder {
        &self.requests
    }

    pub(crate) fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }

    /// Asks for the first page of the model list to prove the key works.
    pub(super) async fn verify_credentials(&self) -> Result<(), SetupError> {
        let request = self
            .requests
            .build_request::<()>(HttpMethod::Get, &endpoints::credential_check(), None)
            .map_err(|e| SetupError::InvalidConfiguration {
                message: e.to_string(),
            })?;

        let response = self.transport.send(request).await.map_err(|e| {
            self.logger.warn(
                "Credential check could not reach the service",
                serde_json::json!({ "error": e.to_string() }),
            );
            SetupError::from(e)
        })?;

        if response.is_success() {
            return Ok(());
        }

        let err = map_setup_status(response.status, &response.body);
        self.logger.warn(
            "Credential check rejected",
            serde_json::json!({ "status": response.status, "error": err.to_string() }),
        );
        Err(err)
    }
}

impl std::fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Creates a client for `api_key`, abandoning setup if `cancel` fires.
///
/// ```no_run
/// use integrations_gemini_setup::{configure_model, create_client};
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = create_client("abc123", &CancellationToken::new()).await?;
/// let model = configure_model(&client, "gemini-pro");
/// assert_eq!(model.safety_settings().len(), 3);
/// # Ok(())
/// # }
/// ```
pub async fn create_client(
    api_key: &str,
    cancel: &CancellationToken,
) -> Result<ServiceClient, SetupError> {
    ServiceClientBuilder::new()
        .api_key(SecretString::new(api_key.to_string()))
        .connect(cancel)
        .await
}

/// Creates a client from a full configuration.
pub async fn create_client_with_config(
    config: ClientConfig,
    cancel: &CancellationToken,
) -> Result<ServiceClient, SetupError> {
    ServiceClientBuilder::from_config(config).connect(cancel).await
}

/// Creates a client from `GEMINI_*` environment variables.
pub async fn create_client_from_env(cancel: &CancellationToken) -> Result<ServiceClient, SetupError> {
    let config = ClientConfig::from_env()?;
    create_client_with_config(config, cancel).await
}
