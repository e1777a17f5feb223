//! End-to-end tests against a local HTTP server using the real reqwest transport.

use integrations_gemini_setup::fixtures::load_fixture;
use integrations_gemini_setup::{
    configure_model, AuthMethod, Content, GeminiError, NoopLogger, ResourceError,
    ServiceClientBuilder, SetupError,
};
use secrecy::SecretString;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn builder_for(server: &MockServer, key: &str) -> ServiceClientBuilder {
    ServiceClientBuilder::new()
        .api_key(SecretString::new(key.to_string()))
        .base_url_str(&server.uri())
        .unwrap()
        .logger(Arc::new(NoopLogger))
}

#[tokio::test]
async fn test_verified_client_against_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .and(query_param("pageSize", "1"))
        .and(header("x-goog-api-key", "abc123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("models/list_response.json")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = builder_for(&server, "abc123")
        .verify_credentials(true)
        .connect(&CancellationToken::new())
        .await;

    assert!(client.is_ok(), "Expected verified client, got {client:?}");
}

#[tokio::test]
async fn test_unauthorized_key_against_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .respond_with(ResponseTemplate::new(401).set_body_string(
            r#"{"error":{"code":401,"message":"Request had invalid authentication credentials.","status":"UNAUTHENTICATED"}}"#,
        ))
        .mount(&server)
        .await;

    let result = builder_for(&server, "revoked")
        .verify_credentials(true)
        .connect(&CancellationToken::new())
        .await;

    match result {
        Err(SetupError::Unauthenticated { message }) => {
            assert_eq!(message, "Request had invalid authentication credentials.");
        }
        other => panic!("Expected Unauthenticated, got {other:?}"),
    }
}

#[tokio::test]
async fn test_slow_server_cancelled_by_deadline() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
        .mount(&server)
        .await;

    // A deadline is a token cancelled by a timer.
    let cancel = CancellationToken::new();
    let deadline = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        deadline.cancel();
    });

    let result = builder_for(&server, "abc123")
        .verify_credentials(true)
        .connect(&cancel)
        .await;

    assert!(matches!(result, Err(SetupError::Cancelled)));
}

#[tokio::test]
async fn test_unreachable_host_is_transport_failure() {
    // Nothing listens on port 9 on loopback.
    let result = ServiceClientBuilder::new()
        .api_key(SecretString::new("abc123".into()))
        .base_url_str("http://127.0.0.1:9")
        .unwrap()
        .connect_timeout(Duration::from_secs(2))
        .logger(Arc::new(NoopLogger))
        .verify_credentials(true)
        .connect(&CancellationToken::new())
        .await;

    assert!(matches!(result, Err(SetupError::Transport { .. })));
}

#[tokio::test]
async fn test_generate_content_against_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-pro:generateContent"))
        .and(query_param("key", "abc123"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(load_fixture("content/success_response.json")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = builder_for(&server, "abc123")
        .auth_method(AuthMethod::QueryParam)
        .connect(&CancellationToken::new())
        .await
        .unwrap();

    let response = configure_model(&client, "gemini-pro")
        .generate_content(vec![Content::user("Hello")])
        .await
        .unwrap();
    assert_eq!(response.text().as_deref(), Some("Hello! How can I help you today?"));

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let categories: Vec<&str> = body["safetySettings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["category"].as_str().unwrap())
        .collect();
    assert_eq!(
        categories,
        vec![
            "HARM_CATEGORY_HARASSMENT",
            "HARM_CATEGORY_HATE_SPEECH",
            "HARM_CATEGORY_SEXUALLY_EXPLICIT",
        ]
    );
    assert!(body["safetySettings"]
        .as_array()
        .unwrap()
        .iter()
        .all(|s| s["threshold"] == "BLOCK_NONE"));
}

#[tokio::test]
async fn test_unknown_model_against_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-nope:generateContent"))
        .respond_with(ResponseTemplate::new(404).set_body_string(
            r#"{"error":{"code":404,"message":"models/gemini-nope is not found for API version v1beta","status":"NOT_FOUND"}}"#,
        ))
        .mount(&server)
        .await;

    let client = builder_for(&server, "abc123")
        .connect(&CancellationToken::new())
        .await
        .unwrap();

    let result = configure_model(&client, "gemini-nope")
        .generate_content(vec![Content::user("Hello")])
        .await;

    match result {
        Err(GeminiError::Resource(ResourceError::ModelNotFound { model })) => {
            assert_eq!(model, "models/gemini-nope");
        }
        other => panic!("Expected ModelNotFound, got {other:?}"),
    }
}
