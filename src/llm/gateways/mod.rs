pub mod groq;

pub use groq::{GroqConfig, GroqGateway, DEFAULT_BASE_URL, DEFAULT_MODEL};
