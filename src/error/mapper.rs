//! Error mapping utilities for HTTP status codes and API responses.

use serde::Deserialize;
use std::time::Duration;

use super::categories::*;
use super::types::GeminiError;

/// Structured API error response from Gemini.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Detailed error information from the API.
#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: i32,
    pub message: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub details: Vec<serde_json::Value>,
}

/// Pulls the human-readable message out of an error body.
///
/// Falls back to the raw body text when it is not the Google error envelope.
pub fn error_message(body: &[u8]) -> String {
    if let Ok(response) = serde_json::from_slice::<ApiErrorResponse>(body) {
        return response.error.message;
    }
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(body) {
        if let Some(msg) = json
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return msg.to_string();
        }
    }
    String::from_utf8_lossy(body).to_string()
}

/// Maps a failed credential check to a `SetupError`.
pub fn map_setup_status(status: u16, body: &[u8]) -> SetupError {
    let message = error_message(body);
    match status {
        401 | 403 => SetupError::Unauthenticated { message },
        // The models endpoint answers 400 for a malformed key.
        400 if message.to_lowercase().contains("api key") => SetupError::Unauthenticated { message },
        _ => SetupError::Rejected { status, message },
    }
}

/// Maps HTTP status codes and response body to `GeminiError` variants.
///
/// `retry_after` is the parsed `Retry-After` header, if the response had one.
pub fn map_http_status_with_body(
    status: u16,
    body: &[u8],
    retry_after: Option<Duration>,
) -> GeminiError {
    let parsed = serde_json::from_slice::<ApiErrorResponse>(body).ok();
    let message = match &parsed {
        Some(response) => response.error.message.clone(),
        None => error_message(body),
    };

    match status {
        400 => {
            let details = parsed
                .as_ref()
                .map(|e| parse_validation_details(&e.error.details))
                .unwrap_or_default();
            GeminiError::Request(RequestError::ValidationError { message, details })
        }

        401 => GeminiError::Authentication(AuthenticationError::InvalidApiKey),

        403 => GeminiError::Authentication(AuthenticationError::PermissionDenied { message }),

        404 => GeminiError::Resource(ResourceError::ModelNotFound {
            model: extract_resource_name(&message),
        }),

        429 => {
            let quota = parsed
                .as_ref()
                .is_some_and(|e| e.error.status == "RESOURCE_EXHAUSTED")
                && message.to_lowercase().contains("quota");
            if quota {
                GeminiError::RateLimit(RateLimitError::QuotaExceeded { retry_after })
            } else {
                GeminiError::RateLimit(RateLimitError::TooManyRequests { retry_after })
            }
        }

        503 => {
            if message.to_lowercase().contains("overload") {
                GeminiError::Server(ServerError::ModelOverloaded {
                    model: extract_resource_name(&message),
                })
            } else {
                GeminiError::Server(ServerError::ServiceUnavailable { retry_after })
            }
        }

        500..=599 => GeminiError::Server(ServerError::InternalError { message }),

        _ => GeminiError::Server(ServerError::InternalError {
            message: format!("HTTP {status}: {message}"),
        }),
    }
}

/// Parses a `Retry-After` header value given in seconds.
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

/// Extracts a resource name from an error message (simple heuristic).
fn extract_resource_name(message: &str) -> String {
    if let Some(found) = message
        .split_whitespace()
        .find(|s| s.starts_with("models/"))
    {
        return found
            .trim_matches(|c: char| !c.is_alphanumeric() && c != '/' && c != '-' && c != '_' && c != '.')
            .to_string();
    }

    for quote in ['\'', '"'] {
        if let Some(start) = message.find(quote) {
            if let Some(end) = message[start + 1..].find(quote) {
                return message[start + 1..start + 1 + end].to_string();
            }
        }
    }

    "unknown".to_string()
}

/// Parses validation details from the error response details array.
fn parse_validation_details(details: &[serde_json::Value]) -> Vec<ValidationDetail> {
    details
        .iter()
        .filter_map(|detail| {
            let obj = detail.as_object()?;
            let field = obj
                .get("field")
                .or_else(|| obj.get("fieldPath"))
                .and_then(|v| v.as_str())
                .unwrap_or("unknown");
            let description = obj
                .get("description")
                .or_else(|| obj.get("message"))
                .and_then(|v| v.as_str())
                .filter(|d| !d.is_empty())?;
            Some(ValidationDetail {
                field: field.to_string(),
                description: description.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_http_status_401() {
        let error = map_http_status_with_body(401, b"Invalid API key", None);
        assert!(matches!(
            error,
            GeminiError::Authentication(AuthenticationError::InvalidApiKey)
        ));
    }

    #[test]
    fn test_map_http_status_429_keeps_retry_after() {
        let error = map_http_status_with_body(429, b"slow down", Some(Duration::from_secs(7)));
        assert!(matches!(
            error,
            GeminiError::RateLimit(RateLimitError::TooManyRequests { .. })
        ));
        assert_eq!(error.retry_after(), Some(Duration::from_secs(7)));
    }

    #[test]
    fn test_map_http_status_429_quota() {
        let body = r#"{"error":{"code":429,"message":"Quota exceeded for metric","status":"RESOURCE_EXHAUSTED"}}"#;
        let error = map_http_status_with_body(429, body.as_bytes(), None);
        assert!(matches!(
            error,
            GeminiError::RateLimit(RateLimitError::QuotaExceeded { .. })
        ));
    }

    #[test]
    fn test_map_http_status_503_overloaded() {
        let error = map_http_status_with_body(503, b"The model is overloaded", None);
        assert!(matches!(
            error,
            GeminiError::Server(ServerError::ModelOverloaded { .. })
        ));
    }

    #[test]
    fn test_map_http_status_with_body_structured() {
        let body = r#"{"error":{"code":400,"message":"Invalid parameter","status":"INVALID_ARGUMENT","details":[{"field":"contents","description":"must not be empty"}]}}"#;
        let error = map_http_status_with_body(400, body.as_bytes(), None);
        if let GeminiError::Request(RequestError::ValidationError { message, details }) = error {
            assert_eq!(message, "Invalid parameter");
            assert_eq!(details.len(), 1);
            assert_eq!(details[0].field, "contents");
        } else {
            panic!("Expected ValidationError");
        }
    }

    #[test]
    fn test_map_http_status_404_model() {
        let body = r#"{"error":{"code":404,"message":"models/gemini-fake is not found for API version v1beta","status":"NOT_FOUND"}}"#;
        let error = map_http_status_with_body(404, body.as_bytes(), None);
        if let GeminiError::Resource(ResourceError::ModelNotFound { model }) = error {
            assert_eq!(model, "models/gemini-fake");
        } else {
            panic!("Expected ModelNotFound");
        }
    }

    #[test]
    fn test_map_setup_status() {
        let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#;
        assert!(matches!(
            map_setup_status(400, body.as_bytes()),
            SetupError::Unauthenticated { .. }
        ));
        assert!(matches!(
            map_setup_status(403, b"forbidden"),
            SetupError::Unauthenticated { .. }
        ));
        assert_eq!(
            map_setup_status(500, b"boom"),
            SetupError::Rejected { status: 500, message: "boom".to_string() }
        );
    }

    #[test]
    fn test_extract_resource_name_with_quotes() {
        assert_eq!(extract_resource_name("Model 'gemini-pro' not found"), "gemini-pro");
        assert_eq!(extract_resource_name("nothing here"), "unknown");
    }

    #[test]
    fn test_parse_retry_after() {
        assert_eq!(parse_retry_after("30"), Some(Duration::from_secs(30)));
        assert_eq!(parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT"), None);
    }
}
