use crate::error::Result;
use crate::llm::gateway::{CompletionConfig, LlmGateway};
use crate::llm::models::{CompletionRequest, LlmMessage};
use std::sync::Arc;
use tracing::{debug, info};

/// Binds a model identifier to a gateway and hands back raw completion text
pub struct LlmBroker {
    model: String,
    gateway: Arc<dyn LlmGateway>,
}

impl LlmBroker {
    /// Create a new LLM broker
    pub fn new(model: impl Into<String>, gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            model: model.into(),
            gateway,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate a text response from a list of messages
    ///
    /// Returns the first choice's content, or an empty string when the service
    /// produced no choice.
    pub async fn generate(
        &self,
        messages: &[LlmMessage],
        config: Option<CompletionConfig>,
    ) -> Result<String> {
        let config = config.unwrap_or_default();

        let response = self.gateway.complete(&self.model, messages, &config).await?;
        let content = response.content.unwrap_or_default();

        debug!(model = %self.model, length = content.len(), "Completion text received");
        Ok(content)
    }

    /// Send a system instruction and user prompt, returning the raw completion text
    pub async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        info!(model = %self.model, prompt = %request.user_prompt, "Requesting completion");
        self.generate(&request.messages(), Some(request.config.clone())).await
    }
}
