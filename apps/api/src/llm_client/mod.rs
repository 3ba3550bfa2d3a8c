//! Claude gateway client.
//!
//! Every Anthropic call in CareerCanvas goes through `LlmClient`, which is
//! also the only holder of the server-side API key. Callers never see the key
//! or the raw HTTP exchange.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod normalize;
pub mod prompts;

use normalize::{normalize, CompletionMode, NormalizeError};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls.
/// Hardcoded to keep parsing output stable across deployments.
pub const MODEL: &str = "claude-3-5-sonnet-20240620";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Token budget for structured resume extraction.
pub const PARSE_MAX_TOKENS: u32 = 4096;
/// Token budget for a single enhancement rewrite.
pub const ENHANCE_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API key not configured")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<UserTurn<'a>>,
}

#[derive(Debug, Serialize)]
struct UserTurn<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl MessagesResponse {
    /// The first `text` block; tool and image blocks are skipped.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .filter(|block| block.block_type == "text")
            .find_map(|block| block.text.as_deref())
    }
}

/// The single LLM client used by all services.
/// Wraps the Anthropic Messages API and the completion normalizer.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl LlmClient {
    pub fn new(api_key: Option<String>) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key,
            endpoint: ANTHROPIC_API_URL.to_string(),
        })
    }

    /// Points the client at a different Messages-compatible endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Makes a single call to the Claude API and returns the raw completion text.
    /// Non-success responses are surfaced as `LlmError::Api` carrying the
    /// upstream status and body; nothing is retried.
    pub async fn complete(
        &self,
        prompt: &str,
        system: &str,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingCredential)?;

        let request_body = MessagesRequest {
            model: MODEL,
            max_tokens,
            system,
            messages: vec![UserTurn {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Messages API responded {status}: {body}");
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let llm_response: MessagesResponse = response.json().await?;

        if let Some(usage) = &llm_response.usage {
            debug!(
                "Completion received ({} tokens in, {} out)",
                usage.input_tokens, usage.output_tokens
            );
        }

        llm_response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }

    /// Calls the LLM and decodes the completion as a JSON object.
    /// The prompt must instruct the model to return valid JSON.
    pub async fn complete_structured(
        &self,
        prompt: &str,
        system: &str,
        max_tokens: u32,
    ) -> Result<Value, LlmError> {
        let raw = self.complete(prompt, system, max_tokens).await?;
        Ok(normalize(&raw, CompletionMode::Structured)?.into_value())
    }

    /// Calls the LLM and returns the trimmed plain-text completion.
    pub async fn complete_plain(
        &self,
        prompt: &str,
        system: &str,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        let raw = self.complete(prompt, system, max_tokens).await?;
        Ok(normalize(&raw, CompletionMode::Plain)?.into_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_picks_first_text_block() {
        let raw = r#"{
            "content": [
                {"type": "tool_use"},
                {"type": "text", "text": "hello"},
                {"type": "text", "text": "ignored"}
            ],
            "usage": {"input_tokens": 3, "output_tokens": 1}
        }"#;
        let response: MessagesResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.text(), Some("hello"));
    }

    #[test]
    fn test_response_without_text_block() {
        let raw = r#"{"content": []}"#;
        let response: MessagesResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.text(), None);
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_any_request() {
        let client = LlmClient::new(None)
            .unwrap()
            .with_endpoint("http://127.0.0.1:9/unreachable");
        assert!(!client.has_credential());
        let err = client.complete("prompt", "system", 16).await.unwrap_err();
        assert!(matches!(err, LlmError::MissingCredential));
    }
}
