use crate::llm::gateway::CompletionConfig;
use serde::{Deserialize, Serialize};

/// Message role in a chat-completion conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// Message in a chat-completion conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmMessage {
    #[serde(default = "default_role")]
    pub role: MessageRole,
    #[serde(default)]
    pub content: String,
}

fn default_role() -> MessageRole {
    MessageRole::User
}

impl LlmMessage {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Response from an LLM gateway
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LlmGatewayResponse {
    /// Content of the first completion choice, if the service returned one.
    pub content: Option<String>,
    pub finish_reason: Option<String>,
}

/// A single prompt-and-instruction exchange sent to the completion service.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system_instruction: String,
    pub user_prompt: String,
    pub config: CompletionConfig,
}

impl CompletionRequest {
    pub fn new(system_instruction: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            user_prompt: user_prompt.into(),
            config: CompletionConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CompletionConfig) -> Self {
        self.config = config;
        self
    }

    /// The role-tagged messages in wire order: system instruction, then user prompt.
    pub fn messages(&self) -> Vec<LlmMessage> {
        vec![
            LlmMessage::system(self.system_instruction.clone()),
            LlmMessage::user(self.user_prompt.clone()),
        ]
    }
}
