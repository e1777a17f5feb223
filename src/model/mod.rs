//! Model configurator: safety-configured handles on a `ServiceClient`.
//!
//! Every handle carries [`BLOCK_NONE_SAFETY_SETTINGS`]: harassment, hate
//! speech and sexually explicit content are set to `BLOCK_NONE`. Dangerous
//! content is not in the table and keeps the service default.

use serde_json::json;

use crate::client::ServiceClient;
use crate::error::{map_http_status_with_body, parse_retry_after, GeminiResult};
use crate::transport::{endpoints, HttpMethod};
use crate::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    HarmBlockThreshold, HarmCategory, SafetySetting,
};

/// Safety overrides attached to every model handle, in request order.
pub const BLOCK_NONE_SAFETY_SETTINGS: [SafetySetting; 3] = [
    SafetySetting::new(HarmCategory::Harassment, HarmBlockThreshold::BlockNone),
    SafetySetting::new(HarmCategory::HateSpeech, HarmBlockThreshold::BlockNone),
    SafetySetting::new(HarmCategory::SexuallyExplicit, HarmBlockThreshold::BlockNone),
];

/// A model on the Gemini service with fixed safety settings.
///
/// Borrows the client it was configured from.
#[derive(Debug, Clone)]
pub struct ModelHandle<'c> {
    client: &'c ServiceClient,
    name: String,
    safety_settings: Vec<SafetySetting>,
    generation_config: Option<GenerationConfig>,
}

/// Configures `model` on `client` with the fixed safety settings.
///
/// The name is not validated; a bad name surfaces as an error from the
/// service when the handle is used.
pub fn configure_model<'c>(client: &'c ServiceClient, model: &str) -> ModelHandle<'c> {
    ModelHandle {
        client,
        name: model.to_string(),
        safety_settings: BLOCK_NONE_SAFETY_SETTINGS.to_vec(),
        generation_config: None,
    }
}

impl<'c> ModelHandle<'c> {
    /// The model name exactly as given.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The model name with the `models/` prefix.
    pub fn resource_name(&self) -> String {
        endpoints::model_resource_name(&self.name)
    }

    /// The safety settings sent with every request.
    pub fn safety_settings(&self) -> &[SafetySetting] {
        &self.safety_settings
    }

    /// The sampling configuration, if one was set.
    pub fn generation_config(&self) -> Option<&GenerationConfig> {
        self.generation_config.as_ref()
    }

    /// The client this handle was configured from.
    pub fn client(&self) -> &'c ServiceClient {
        self.client
    }

    /// Sets the sampling configuration. Safety settings are unaffected.
    #[must_use]
    pub fn with_generation_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }

    /// Builds the request body this handle would send for `contents`.
    pub fn build_request(&self, contents: Vec<Content>) -> GenerateContentRequest {
        GenerateContentRequest {
            contents,
            safety_settings: Some(self.safety_settings.clone()),
            generation_config: self.generation_config.clone(),
        }
    }

    /// Sends one generateContent call.
    ///
    /// No retry is attempted; a failed call returns the mapped service error.
    pub async fn generate_content(
        &self,
        contents: Vec<Content>,
    ) -> GeminiResult<GenerateContentResponse> {
        let body = self.build_request(contents);
        let request = self.client.requests().build_request(
            HttpMethod::Post,
            &endpoints::generate_content(&self.name),
            Some(&body),
        )?;

        self.client.logger().debug(
            "Sending generateContent request",
            json!({
                "model": self.resource_name(),
                "contents": body.contents.len(),
            }),
        );

        let response = self.client.transport().send(request).await?;

        if !response.is_success() {
            let retry_after = response.header("retry-after").and_then(parse_retry_after);
            let err = map_http_status_with_body(response.status, &response.body, retry_after);
            self.client.logger().warn(
                "generateContent failed",
                json!({
                    "model": self.resource_name(),
                    "status": response.status,
                    "error": err.to_string(),
                }),
            );
            return Err(err);
        }

        Ok(serde_json::from_slice(&response.body)?)
    }
}
