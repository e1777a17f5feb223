//! Reqwest-based HTTP transport implementation.

use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

use super::error::TransportError;
use super::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};

/// Reqwest-based HTTP transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a new reqwest transport with the given timeouts.
    pub fn new(timeout: Duration, connect_timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| TransportError::Connection(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    fn convert_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }

    /// Header values are left out of error messages; one of them is the API key.
    fn convert_headers(
        headers: HashMap<String, String>,
    ) -> Result<reqwest::header::HeaderMap, TransportError> {
        let mut header_map = reqwest::header::HeaderMap::new();
        for (key, value) in headers {
            let name = reqwest::header::HeaderName::from_bytes(key.as_bytes())
                .map_err(|_| TransportError::Request(format!("Invalid header name: {key}")))?;
            let val = reqwest::header::HeaderValue::from_str(&value)
                .map_err(|_| TransportError::Request(format!("Invalid value for header {key}")))?;
            header_map.insert(name, val);
        }
        Ok(header_map)
    }

    fn extract_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, String> {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value.to_str().ok().map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut req_builder = self
            .client
            .request(Self::convert_method(request.method), &request.url)
            .headers(Self::convert_headers(request.headers)?);

        if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        let response = req_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout
            } else {
                TransportError::Connection(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let headers = Self::extract_headers(response.headers());
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Request(format!("Failed to read response body: {e}")))?;

        Ok(HttpResponse { status, headers, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reqwest_transport_creation() {
        let transport = ReqwestTransport::new(Duration::from_secs(30), Duration::from_secs(10));
        assert!(transport.is_ok());
    }

    #[test]
    fn test_convert_headers() {
        let mut headers = HashMap::new();
        headers.insert("x-goog-api-key".to_string(), "abc".to_string());
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        let map = ReqwestTransport::convert_headers(headers).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("x-goog-api-key").unwrap(), "abc");
    }

    #[test]
    fn test_convert_headers_rejects_invalid_name() {
        let mut headers = HashMap::new();
        headers.insert("bad header".to_string(), "value".to_string());

        let result = ReqwestTransport::convert_headers(headers);
        assert!(matches!(result, Err(TransportError::Request(_))));
    }

    #[test]
    fn test_convert_headers_rejects_invalid_value_without_echoing_it() {
        let mut headers = HashMap::new();
        headers.insert("x-goog-api-key".to_string(), "abc\n123".to_string());

        match ReqwestTransport::convert_headers(headers) {
            Err(TransportError::Request(message)) => {
                assert!(message.contains("x-goog-api-key"));
                assert!(!message.contains("abc"));
            }
            other => panic!("expected a request error, got {other:?}"),
        }
    }
}
