//! Groq Gateway for chat completions.
//!
//! Groq serves an OpenAI-compatible `chat/completions` endpoint. This gateway
//! speaks that wire format and classifies failures into authentication and
//! transport errors.

use crate::error::{Result, TaskGenError};
use crate::llm::gateway::{CompletionConfig, LlmGateway};
use crate::llm::models::{LlmGatewayResponse, LlmMessage};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Configuration for connecting to the Groq API.
#[derive(Debug, Clone)]
pub struct GroqConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Option<Duration>,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }
}

impl GroqConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Resolve configuration through an arbitrary variable lookup.
    ///
    /// Reads `GROQ_API_KEY`, `GROQ_API_ENDPOINT` and `GROQ_MODEL`; blank values
    /// count as unset.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            api_key: var("GROQ_API_KEY").unwrap_or_default(),
            base_url: var("GROQ_API_ENDPOINT").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: var("GROQ_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout: None,
        }
    }
}

/// Gateway for the Groq chat-completion service.
pub struct GroqGateway {
    client: Client,
    config: GroqConfig,
}

impl GroqGateway {
    /// Create a new Groq gateway with configuration from the environment.
    pub fn new() -> Self {
        Self::with_config(GroqConfig::default())
    }

    /// Create a new Groq gateway with custom configuration.
    pub fn with_config(config: GroqConfig) -> Self {
        let mut client_builder = Client::builder();

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder.build().unwrap_or_else(|err| {
            warn!(error = %err, "Falling back to default HTTP client");
            Client::new()
        });

        Self { client, config }
    }

    /// Create gateway with custom API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self::with_config(GroqConfig {
            api_key: api_key.into(),
            ..Default::default()
        })
    }

    /// Create gateway with custom API key and base URL.
    pub fn with_api_key_and_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self::with_config(GroqConfig {
            api_key: api_key.into(),
            base_url: base_url.into(),
            ..Default::default()
        })
    }

    pub fn config(&self) -> &GroqConfig {
        &self.config
    }

    fn build_body(model: &str, messages: &[LlmMessage], config: &CompletionConfig) -> Value {
        serde_json::json!({
            "model": model,
            "messages": messages,
            "temperature": config.temperature,
            "top_p": config.top_p,
            "frequency_penalty": config.frequency_penalty,
            "presence_penalty": config.presence_penalty,
            "max_completion_tokens": config.max_tokens,
        })
    }
}

impl Default for GroqGateway {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull `error.message` out of an error body, falling back to the raw text.
fn extract_error_message(status: StatusCode, body: &str) -> String {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(String::from));

    match message {
        Some(msg) if !msg.is_empty() => msg,
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => format!("Groq API error: {}", status),
    }
}

#[async_trait]
impl LlmGateway for GroqGateway {
    async fn complete(
        &self,
        model: &str,
        messages: &[LlmMessage],
        config: &CompletionConfig,
    ) -> Result<LlmGatewayResponse> {
        if self.config.api_key.trim().is_empty() {
            return Err(TaskGenError::AuthenticationError("No API key provided".to_string()));
        }

        info!("Delegating to Groq for completion");
        debug!("Model: {}, Message count: {}", model, messages.len());

        let body = Self::build_body(model, messages, config);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = extract_error_message(status, &error_text);
            warn!(status = %status, "Groq request failed");

            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    TaskGenError::AuthenticationError(message)
                }
                _ => TaskGenError::TransportError(message),
            });
        }

        let response_body: Value = response.json().await?;
        let Some(choices) = response_body["choices"].as_array() else {
            return Err(TaskGenError::TransportError(
                "Groq API returned an unexpected response envelope".to_string(),
            ));
        };

        let choice = choices.first();
        let content = choice.and_then(|c| c["message"]["content"].as_str()).map(String::from);
        let finish_reason = choice.and_then(|c| c["finish_reason"].as_str()).map(String::from);

        debug!(finish_reason = ?finish_reason, "Groq completion received");

        Ok(LlmGatewayResponse {
            content,
            finish_reason,
        })
    }
}
