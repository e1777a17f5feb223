//! Request and response bodies for `generateContent`.
//!
//! Response enums carry an `Unspecified` catch-all so that values added
//! to the service later still decode.

use serde::{Deserialize, Serialize};

use super::content::Content;
use super::safety::{SafetyRating, SafetySetting};

/// Sampling parameters sent alongside the safety settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Nucleus sampling mass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    /// Top-k cutoff.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<i32>,
    /// Upper bound on generated tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<i32>,
    /// Generation stops at any of these.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
}

/// Body of a `generateContent` call as built by a model handle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation turns to send.
    pub contents: Vec<Content>,
    /// Per-category blocking overrides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_settings: Option<Vec<SafetySetting>>,
    /// Sampling parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// Why the model stopped producing a candidate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinishReason {
    /// Natural end of output or a stop sequence.
    Stop,
    /// Hit `max_output_tokens`.
    MaxTokens,
    /// Stopped by a safety filter.
    Safety,
    /// Stopped for reciting training data.
    Recitation,
    /// Stopped for a blocklisted term.
    Blocklist,
    /// Stopped for prohibited content.
    ProhibitedContent,
    /// Stopped for sensitive personal data.
    Spii,
    /// Any other reason the service reports.
    #[serde(rename = "FINISH_REASON_UNSPECIFIED", other)]
    Unspecified,
}

/// Why the prompt itself was refused.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockReason {
    /// Refused by a safety filter.
    Safety,
    /// Refused for a blocklisted term.
    Blocklist,
    /// Refused for prohibited content.
    ProhibitedContent,
    /// Any other reason the service reports.
    #[serde(rename = "BLOCK_REASON_UNSPECIFIED", other)]
    Unspecified,
}

/// One generated answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content. Missing when the candidate was filtered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    /// Why generation stopped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
    /// Per-category ratings of the candidate.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub safety_ratings: Vec<SafetyRating>,
}

/// Verdict on the prompt, present when the prompt was rated or refused.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// Set when the prompt was refused.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<BlockReason>,
    /// Per-category ratings of the prompt.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub safety_ratings: Vec<SafetyRating>,
}

/// Token accounting returned with a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UsageMetadata {
    /// Tokens in the prompt.
    pub prompt_token_count: i32,
    /// Tokens across all candidates.
    pub candidates_token_count: i32,
    /// Prompt plus candidates.
    pub total_token_count: i32,
}

/// Body returned by `generateContent`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Generated answers; empty when the prompt was refused.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<Candidate>,
    /// Verdict on the prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<PromptFeedback>,
    /// Token accounting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
    /// Model revision that served the call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, if it has any content.
    pub fn text(&self) -> Option<String> {
        self.candidates.first()?.content.as_ref().map(Content::text)
    }

    /// Why the first candidate stopped.
    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.candidates.first()?.finish_reason
    }

    /// Reason the prompt was refused, if it was.
    pub fn block_reason(&self) -> Option<BlockReason> {
        self.prompt_feedback.as_ref()?.block_reason
    }
}
