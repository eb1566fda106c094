pub mod broker;
pub mod gateway;
pub mod gateways;
pub mod models;

pub use broker::LlmBroker;
pub use gateway::{CompletionConfig, LlmGateway};
pub use models::{CompletionRequest, LlmGatewayResponse, LlmMessage, MessageRole};
