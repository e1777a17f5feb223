//! Endpoint paths used by the client factory and model handles.

/// Base path for models endpoints.
pub const MODELS: &str = "/models";

/// Resource name of a model, adding the `models/` prefix if missing.
///
/// ```
/// use integrations_gemini_setup::transport::endpoints;
///
/// assert_eq!(endpoints::model_resource_name("gemini-pro"), "models/gemini-pro");
/// assert_eq!(endpoints::model_resource_name("models/gemini-pro"), "models/gemini-pro");
/// ```
pub fn model_resource_name(name: &str) -> String {
    if name.starts_with("models/") {
        name.to_string()
    } else {
        format!("models/{name}")
    }
}

/// Path of the generateContent method for a model.
///
/// ```
/// use integrations_gemini_setup::transport::endpoints;
///
/// assert_eq!(endpoints::generate_content("gemini-pro"), "/models/gemini-pro:generateContent");
/// ```
pub fn generate_content(model: &str) -> String {
    format!("/{}:generateContent", model_resource_name(model))
}

/// Path used to check credentials: the first page of the model list.
pub fn credential_check() -> String {
    format!("{MODELS}?pageSize=1")
}
