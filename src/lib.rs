pub mod config;
pub mod error;
pub mod llm;
pub mod tasks;

pub use error::{Result, TaskGenError};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Result, TaskGenError};
    pub use crate::llm::gateways::{GroqConfig, GroqGateway};
    pub use crate::llm::{CompletionConfig, CompletionRequest, LlmBroker, LlmGateway, LlmMessage};
    pub use crate::tasks::{Category, Complexity, TaskGenerator, TaskRecord};
}
