//! HTTP implementation of [`PromptProvider`] over an OpenAI-style
//! chat-completions endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::parse::parse_completion;
use crate::template::{build_system_prompt, build_user_message};
use crate::{PromptProvider, ProviderCompletion, ProviderError};

/// Default bound on one provider call. Providers are the long pole of the
/// pipeline; past this the call is treated exactly like a failure.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for the upstream AI provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL of the chat-completions API (no trailing slash).
    pub base_url: String,
    /// Bearer token for the provider account.
    pub api_key: String,
    /// Upstream model used to author prompts (not the target video model).
    pub completion_model: String,
    /// Per-call timeout in seconds.
    pub timeout_secs: u64,
}

/// Production [`PromptProvider`] speaking HTTP to the configured endpoint.
pub struct HttpPromptProvider {
    http: reqwest::Client,
    config: ProviderConfig,
}

impl HttpPromptProvider {
    /// Build a provider with a per-request timeout baked into the client.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Connection(e.to_string()))?;
        Ok(Self { http, config })
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    total_tokens: i64,
}

#[async_trait]
impl PromptProvider for HttpPromptProvider {
    async fn invoke(
        &self,
        idea: &str,
        model: &str,
        style: &str,
    ) -> Result<ProviderCompletion, ProviderError> {
        let request = ChatRequest {
            model: &self.config.completion_model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: build_system_prompt(style),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: build_user_message(idea, model),
                },
            ],
            temperature: 0.7,
        };

        let url = format!("{}/v1/chat/completions", self.config.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout
                } else {
                    ProviderError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Provider returned error status");
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body: ChatResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout
            } else {
                ProviderError::Malformed(e.to_string())
            }
        })?;

        let content = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ProviderError::Malformed("response has no choices".to_string()))?;

        let mut completion = parse_completion(&content);
        completion.tokens_used = body.usage.map(|u| u.total_tokens);

        tracing::debug!(
            tokens = ?completion.tokens_used,
            structured = completion.structured.subject.is_some(),
            "Provider completion parsed"
        );

        Ok(completion)
    }
}
