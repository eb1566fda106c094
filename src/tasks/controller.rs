//! Presentation state and the generate action that drives compose, complete and decode.

use crate::error::{Result, TaskGenError};
use crate::llm::broker::LlmBroker;
use crate::llm::gateway::{CompletionConfig, LlmGateway};
use crate::llm::gateways::{GroqConfig, GroqGateway};
use crate::llm::models::CompletionRequest;
use crate::tasks::composer::PromptComposer;
use crate::tasks::decoder::{TaskDecoder, TaskRecord};
use crate::tasks::selection::{Category, Complexity};
use crate::tasks::vocabulary::SYSTEM_INSTRUCTION;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Builds a gateway for the credential current at request time.
pub type GatewayFactory = Box<dyn Fn(&str) -> Arc<dyn LlmGateway> + Send + Sync>;

/// Everything the user sees: selections, credential, progress, error and results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratorState {
    pub category: Category,
    pub complexity: Complexity,
    pub api_key: String,
    pub loading: bool,
    pub error: Option<String>,
    pub tasks: Vec<TaskRecord>,
}

impl GeneratorState {
    pub fn has_credential(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Whether the generate action is enabled.
    pub fn can_generate(&self) -> bool {
        !self.loading && self.has_credential()
    }

    pub fn start_request(&mut self) {
        self.loading = true;
        self.error = None;
        self.tasks.clear();
    }

    pub fn receive_success(&mut self, tasks: Vec<TaskRecord>) {
        self.tasks = tasks;
        self.loading = false;
    }

    pub fn receive_failure(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.loading = false;
    }
}

pub struct TaskGenerator {
    state: GeneratorState,
    model: String,
    completion_config: CompletionConfig,
    composer: PromptComposer<Box<dyn RngCore + Send>>,
    decoder: TaskDecoder,
    gateway_factory: GatewayFactory,
}

impl TaskGenerator {
    /// Create a generator talking to Groq with the given connection settings.
    ///
    /// The configured API key seeds the credential field; the gateway itself is
    /// rebuilt for every request from whatever key is current then.
    pub fn new(config: GroqConfig) -> Self {
        let model = config.model.clone();
        let api_key = config.api_key.clone();
        let factory: GatewayFactory = Box::new(move |key: &str| {
            let gateway = GroqGateway::with_config(GroqConfig {
                api_key: key.to_string(),
                ..config.clone()
            });
            Arc::new(gateway) as Arc<dyn LlmGateway>
        });

        let mut generator = Self::with_gateway_factory(model, factory);
        generator.state.api_key = api_key;
        generator
    }

    pub fn with_gateway_factory(model: impl Into<String>, gateway_factory: GatewayFactory) -> Self {
        Self {
            state: GeneratorState::default(),
            model: model.into(),
            completion_config: CompletionConfig::default(),
            composer: PromptComposer::with_rng(Box::new(StdRng::from_entropy())),
            decoder: TaskDecoder::default(),
            gateway_factory,
        }
    }

    /// Replace the random source used for prompt composition.
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.composer = PromptComposer::with_rng(Box::new(rng));
        self
    }

    pub fn with_completion_config(mut self, config: CompletionConfig) -> Self {
        self.completion_config = config;
        self
    }

    pub fn state(&self) -> &GeneratorState {
        &self.state
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.state.api_key = api_key.into();
    }

    pub fn set_category(&mut self, category: Category) {
        self.state.category = category;
    }

    pub fn set_complexity(&mut self, complexity: Complexity) {
        self.state.complexity = complexity;
    }

    /// Run one generate action.
    ///
    /// The outcome is recorded in [`state`](Self::state) either way; the error is
    /// also returned so callers can react to it.
    pub async fn generate(&mut self) -> Result<()> {
        if !self.state.has_credential() {
            let err = TaskGenError::MissingCredential;
            self.state.error = Some(err.user_message());
            return Err(err);
        }

        self.state.start_request();

        match self.request_tasks().await {
            Ok(tasks) => {
                info!(count = tasks.len(), "Tasks generated");
                self.state.receive_success(tasks);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Task generation failed");
                self.state.receive_failure(err.user_message());
                Err(err)
            }
        }
    }

    async fn request_tasks(&mut self) -> Result<Vec<TaskRecord>> {
        // Selections are shown to the user but do not shape the prompt.
        debug!(
            category = %self.state.category,
            complexity = %self.state.complexity,
            "Selections not applied to prompt"
        );

        let prompt = self.composer.compose();
        let request = CompletionRequest::new(SYSTEM_INSTRUCTION, prompt.text())
            .with_config(self.completion_config.clone());

        let gateway = (self.gateway_factory)(&self.state.api_key);
        let broker = LlmBroker::new(self.model.clone(), gateway);

        let raw = broker.complete(&request).await?;
        debug!(raw = %raw, "Raw completion");

        Ok(self.decoder.decode(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MISSING_CREDENTIAL_MESSAGE;
    use crate::llm::models::{LlmGatewayResponse, LlmMessage, MessageRole};
    use rand::rngs::mock::StepRng;
    use std::sync::Mutex;

    enum Reply {
        Content(&'static str),
        Auth(&'static str),
        Transport(&'static str),
    }

    struct MockGateway {
        reply: Reply,
        calls: Mutex<Vec<Vec<LlmMessage>>>,
    }

    impl MockGateway {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait::async_trait]
    impl LlmGateway for MockGateway {
        async fn complete(
            &self,
            _model: &str,
            messages: &[LlmMessage],
            _config: &CompletionConfig,
        ) -> Result<LlmGatewayResponse> {
            self.calls.lock().unwrap().push(messages.to_vec());
            match self.reply {
                Reply::Content(text) => Ok(LlmGatewayResponse {
                    content: Some(text.to_string()),
                    finish_reason: Some("stop".to_string()),
                }),
                Reply::Auth(msg) => Err(TaskGenError::AuthenticationError(msg.to_string())),
                Reply::Transport(msg) => Err(TaskGenError::TransportError(msg.to_string())),
            }
        }
    }

    struct Harness {
        generator: TaskGenerator,
        gateway: Arc<MockGateway>,
        keys: Arc<Mutex<Vec<String>>>,
    }

    fn harness(reply: Reply) -> Harness {
        let gateway = MockGateway::new(reply);
        let keys = Arc::new(Mutex::new(Vec::new()));

        let factory_gateway = gateway.clone();
        let factory_keys = keys.clone();
        let factory: GatewayFactory = Box::new(move |key: &str| {
            factory_keys.lock().unwrap().push(key.to_string());
            factory_gateway.clone() as Arc<dyn LlmGateway>
        });

        let generator =
            TaskGenerator::with_gateway_factory("test-model", factory).with_rng(StepRng::new(0, 0));

        Harness {
            generator,
            gateway,
            keys,
        }
    }

    #[test]
    fn test_state_transitions() {
        let mut state = GeneratorState {
            error: Some("old".to_string()),
            tasks: vec![TaskRecord::new("old", "old")],
            ..Default::default()
        };

        state.start_request();
        assert!(state.loading);
        assert!(state.error.is_none());
        assert!(state.tasks.is_empty());

        state.receive_success(vec![TaskRecord::new("A", "B")]);
        assert!(!state.loading);
        assert_eq!(state.tasks.len(), 1);

        state.start_request();
        state.receive_failure("nope");
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("nope"));
        assert!(state.tasks.is_empty());
    }

    #[test]
    fn test_can_generate() {
        let mut state = GeneratorState::default();
        assert!(!state.can_generate());

        state.api_key = "gsk".to_string();
        assert!(state.can_generate());

        state.start_request();
        assert!(!state.can_generate());
    }

    #[test]
    fn test_new_seeds_credential_and_model_from_config() {
        let generator = TaskGenerator::new(GroqConfig {
            api_key: "gsk-env".to_string(),
            base_url: "http://localhost".to_string(),
            model: "llama-3.1-8b-instant".to_string(),
            timeout: None,
        });

        assert_eq!(generator.state().api_key, "gsk-env");
        assert_eq!(generator.model(), "llama-3.1-8b-instant");
    }

    #[tokio::test]
    async fn test_missing_credential_never_calls_client() {
        let mut h = harness(Reply::Content("[]"));

        let result = h.generator.generate().await;

        assert!(matches!(result, Err(TaskGenError::MissingCredential)));
        assert_eq!(h.generator.state().error.as_deref(), Some(MISSING_CREDENTIAL_MESSAGE));
        assert!(!h.generator.state().loading);
        assert_eq!(h.gateway.call_count(), 0);
        assert!(h.keys.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generate_success_decodes_tasks() {
        let mut h = harness(Reply::Content(
            r#"[{"title":"Crazy Painter","description":"Paint with your feet."}]"#,
        ));
        h.generator.set_api_key("gsk-test");

        h.generator.generate().await.unwrap();

        let state = h.generator.state();
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(
            state.tasks,
            vec![TaskRecord::new("Crazy Painter", "Paint with your feet.")]
        );
        assert_eq!(h.keys.lock().unwrap().as_slice(), ["gsk-test".to_string()]);
    }

    #[tokio::test]
    async fn test_generate_sends_instruction_and_composed_prompt() {
        let mut h = harness(Reply::Content("[]"));
        h.generator.set_api_key("gsk-test");
        h.generator.set_category(Category::Health);
        h.generator.set_complexity(Complexity::Complex);

        h.generator.generate().await.unwrap();

        let calls = h.gateway.calls.lock().unwrap();
        let messages = &calls[0];
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[0].content, SYSTEM_INSTRUCTION);
        assert_eq!(messages[1].role, MessageRole::User);
        // Category and complexity are not part of the prompt.
        assert_eq!(messages[1].content, "generate 5 funny tasks related to daily life.");
    }

    #[tokio::test]
    async fn test_authentication_failure_is_surfaced_verbatim() {
        let mut h = harness(Reply::Auth("Invalid API Key"));
        h.generator.set_api_key("gsk-bad");

        let result = h.generator.generate().await;

        assert!(matches!(result, Err(TaskGenError::AuthenticationError(_))));
        let state = h.generator.state();
        assert_eq!(state.error.as_deref(), Some("Invalid API Key"));
        assert!(!state.loading);
        assert!(state.tasks.is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_without_message_uses_fallback() {
        let mut h = harness(Reply::Transport(""));
        h.generator.set_api_key("gsk-test");

        let _ = h.generator.generate().await;

        assert_eq!(
            h.generator.state().error.as_deref(),
            Some("Failed to generate task. Check your API key.")
        );
    }

    #[test]
    fn test_generate_from_blocking_code() {
        let mut h = harness(Reply::Content(r#"{"title": "Nap", "description": "Take one."}"#));
        h.generator.set_api_key("gsk-test");

        tokio_test::block_on(h.generator.generate()).unwrap();

        assert_eq!(h.generator.state().tasks, vec![TaskRecord::new("Nap", "Take one.")]);
    }

    #[tokio::test]
    async fn test_new_request_clears_previous_error() {
        let mut h = harness(Reply::Content("Just a line"));

        let _ = h.generator.generate().await;
        assert!(h.generator.state().error.is_some());

        h.generator.set_api_key("gsk-test");
        h.generator.generate().await.unwrap();

        let state = h.generator.state();
        assert!(state.error.is_none());
        assert_eq!(
            state.tasks,
            vec![TaskRecord::new("Just a line", "No description generated")]
        );
        assert_eq!(h.gateway.call_count(), 1);
    }
}
