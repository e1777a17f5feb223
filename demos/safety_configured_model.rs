//! Creates a client, configures a model with the fixed safety settings and
//! sends one prompt.
//!
//! ```bash
//! export GEMINI_API_KEY="your-api-key-here"
//! cargo run --example safety_configured_model
//! ```

use integrations_gemini_setup::{configure_model, create_client_from_env, Content};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // Give setup ten seconds before abandoning it.
    let cancel = CancellationToken::new();
    let deadline = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(10)).await;
        deadline.cancel();
    });

    let client = create_client_from_env(&cancel).await?;
    let model = configure_model(&client, "gemini-pro");

    for setting in model.safety_settings() {
        tracing::info!(category = ?setting.category, threshold = ?setting.threshold, "safety override");
    }

    let response = model
        .generate_content(vec![Content::user("Write a haiku about the borrow checker.")])
        .await?;

    match response.text() {
        Some(text) => tracing::info!(%text, "model replied"),
        None => tracing::warn!(feedback = ?response.prompt_feedback, "no candidate returned"),
    }

    Ok(())
}
