//! Task suggestions: prompt composition, response decoding and the controller
//! that ties them to a completion service.

pub mod composer;
pub mod controller;
pub mod decoder;
pub mod render;
pub mod selection;
pub mod vocabulary;

pub use composer::{compose, GeneratedPrompt, PromptComposer};
pub use controller::{GatewayFactory, GeneratorState, TaskGenerator};
pub use decoder::{decode, DecodeTier, TaskDecoder, TaskRecord};
pub use selection::{Category, Complexity};
