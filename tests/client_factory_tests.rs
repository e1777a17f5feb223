//! Integration tests for the client factory.

use integrations_gemini_setup::fixtures::load_fixture;
use integrations_gemini_setup::mocks::{MockAuthManager, MockHttpTransport};
use integrations_gemini_setup::transport::{HttpMethod, TransportError};
use integrations_gemini_setup::{
    create_client, AuthMethod, NoopLogger, ServiceClient, ServiceClientBuilder, SetupError,
};
use secrecy::SecretString;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Builder wired to a mock transport and a silent logger.
fn mock_builder(transport: Arc<MockHttpTransport>, key: &str) -> ServiceClientBuilder {
    ServiceClientBuilder::new()
        .api_key(SecretString::new(key.to_string()))
        .transport(transport)
        .logger(Arc::new(NoopLogger))
}

#[tokio::test]
async fn test_valid_key_live_token_succeeds() {
    // Arrange
    let transport = Arc::new(MockHttpTransport::new());

    // Act
    let result = mock_builder(transport.clone(), "abc123")
        .connect(&CancellationToken::new())
        .await;

    // Assert
    assert!(result.is_ok(), "Expected client, got {result:?}");
    transport.verify_request_count(0);
}

#[tokio::test]
async fn test_empty_key_is_setup_failure() {
    let result = create_client("", &CancellationToken::new()).await;
    assert!(matches!(result, Err(SetupError::MissingApiKey)));
}

#[tokio::test]
async fn test_cancelled_token_fails_without_touching_transport() {
    // Arrange
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, "{}");
    let cancel = CancellationToken::new();
    cancel.cancel();

    // Act
    let result = mock_builder(transport.clone(), "abc123")
        .verify_credentials(true)
        .connect(&cancel)
        .await;

    // Assert
    assert!(matches!(result, Err(SetupError::Cancelled)));
    transport.verify_request_count(0);
}

#[tokio::test]
async fn test_cancel_during_credential_check_returns_promptly() {
    // Arrange: a service that would take 30 seconds to answer
    let transport = Arc::new(MockHttpTransport::new().with_latency(Duration::from_secs(30)));
    transport.enqueue_json_response(200, &load_fixture("models/list_response.json"));

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    // Act
    let started = Instant::now();
    let result = mock_builder(transport.clone(), "abc123")
        .verify_credentials(true)
        .connect(&cancel)
        .await;

    // Assert
    assert!(matches!(result, Err(SetupError::Cancelled)));
    assert!(started.elapsed() < Duration::from_secs(5));
    transport.verify_request_count(1);
}

#[tokio::test]
async fn test_credential_check_invalid_key() {
    // Arrange
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(400, &load_fixture("errors/invalid_api_key.json"));

    // Act
    let result = mock_builder(transport, "not-a-key")
        .verify_credentials(true)
        .connect(&CancellationToken::new())
        .await;

    // Assert
    assert!(matches!(result, Err(SetupError::Unauthenticated { .. })));
}

#[tokio::test]
async fn test_credential_check_server_error_is_rejected() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(
        503,
        r#"{"error":{"code":503,"message":"The service is currently unavailable.","status":"UNAVAILABLE"}}"#,
    );

    let result = mock_builder(transport, "abc123")
        .verify_credentials(true)
        .connect(&CancellationToken::new())
        .await;

    assert_eq!(
        result.unwrap_err(),
        SetupError::Rejected {
            status: 503,
            message: "The service is currently unavailable.".to_string(),
        }
    );
}

#[tokio::test]
async fn test_credential_check_network_failure_surfaces_cause() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_error(TransportError::Connection("connection refused".to_string()));

    let result = mock_builder(transport, "abc123")
        .verify_credentials(true)
        .connect(&CancellationToken::new())
        .await;

    match result {
        Err(SetupError::Transport { message }) => assert!(message.contains("connection refused")),
        other => panic!("Expected Transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_credential_check_with_query_param_auth() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, &load_fixture("models/list_response.json"));

    mock_builder(transport.clone(), "abc123")
        .auth_method(AuthMethod::QueryParam)
        .verify_credentials(true)
        .connect(&CancellationToken::new())
        .await
        .unwrap();

    transport.verify_request(0, HttpMethod::Get, "key=abc123");
    let request = transport.last_request().unwrap();
    assert!(!request.headers.contains_key("x-goog-api-key"));
}

#[tokio::test]
async fn test_injected_auth_manager_supplies_credentials() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, "{}");

    mock_builder(transport.clone(), "configured-key")
        .auth_manager(Arc::new(MockAuthManager::with_query_param("injected-key")))
        .verify_credentials(true)
        .connect(&CancellationToken::new())
        .await
        .unwrap();

    transport.verify_request(0, HttpMethod::Get, "key=injected-key");
    let request = transport.last_request().unwrap();
    assert!(!request.url.contains("configured-key"));
    assert!(!request.headers.contains_key("x-goog-api-key"));
}

#[tokio::test]
async fn test_base_url_path_prefix_is_kept() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, "{}");

    mock_builder(transport.clone(), "abc123")
        .base_url_str("https://proxy.example.com/gemini")
        .unwrap()
        .verify_credentials(true)
        .connect(&CancellationToken::new())
        .await
        .unwrap();

    let request = transport.last_request().unwrap();
    assert!(
        request
            .url
            .starts_with("https://proxy.example.com/gemini/v1beta/models"),
        "unexpected url {}",
        request.url
    );
}

#[tokio::test]
async fn test_invalid_base_url_reports_input() {
    let result = ServiceClientBuilder::new().base_url_str("not a url");
    match result {
        Err(SetupError::InvalidBaseUrl { url, .. }) => assert_eq!(url, "not a url"),
        Err(other) => panic!("unexpected error {other:?}"),
        Ok(_) => panic!("expected InvalidBaseUrl"),
    }
}

#[tokio::test]
async fn test_each_call_performs_fresh_setup() {
    // Two verified clients need two credential checks: nothing is cached.
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, "{}");
    transport.enqueue_json_response(200, "{}");

    for _ in 0..2 {
        mock_builder(transport.clone(), "abc123")
            .verify_credentials(true)
            .connect(&CancellationToken::new())
            .await
            .unwrap();
    }

    transport.verify_request_count(2);
}

#[tokio::test]
async fn test_clients_can_be_created_from_many_tasks() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            tokio::spawn(async move {
                create_client(&format!("key-{i}"), &CancellationToken::new()).await
            })
        })
        .collect();

    for handle in handles {
        let client: ServiceClient = handle.await.unwrap().unwrap();
        assert_eq!(client.config().api_version, "v1beta");
    }
}
