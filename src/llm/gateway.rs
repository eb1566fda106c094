use crate::error::Result;
use crate::llm::models::{LlmGatewayResponse, LlmMessage};
use async_trait::async_trait;

/// Sampling parameters for a chat completion
///
/// The defaults lean toward short, varied answers: high temperature and
/// nucleus threshold, with penalties against repeating tokens and topics.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub max_tokens: usize,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            temperature: 0.9,
            top_p: 0.95,
            frequency_penalty: 0.6,
            presence_penalty: 0.6,
            max_tokens: 200,
        }
    }
}

/// Abstract interface for chat-completion providers
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Complete a chat request and return the first choice
    async fn complete(
        &self,
        model: &str,
        messages: &[LlmMessage],
        config: &CompletionConfig,
    ) -> Result<LlmGatewayResponse>;
}
