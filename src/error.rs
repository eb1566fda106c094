//! Error types and result aliases for taskgen.
//!
//! [`TaskGenError`] covers every way a task request can fail before a response
//! reaches the decoder. Decoding itself never fails: a degraded response still
//! produces a best-effort task list.

use thiserror::Error;

/// Shown when the service gave no usable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate task. Check your API key.";

/// Shown when a request is triggered without a credential.
pub const MISSING_CREDENTIAL_MESSAGE: &str = "Please enter your Groq API key";

#[derive(Error, Debug)]
pub enum TaskGenError {
    #[error("Please enter your Groq API key")]
    MissingCredential,

    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<reqwest::Error> for TaskGenError {
    fn from(err: reqwest::Error) -> Self {
        TaskGenError::TransportError(err.to_string())
    }
}

impl TaskGenError {
    /// The string put in front of the user for this failure.
    ///
    /// Service messages pass through verbatim; an empty message falls back to
    /// [`GENERIC_FAILURE_MESSAGE`].
    pub fn user_message(&self) -> String {
        let message = match self {
            TaskGenError::MissingCredential => MISSING_CREDENTIAL_MESSAGE.to_string(),
            TaskGenError::AuthenticationError(msg)
            | TaskGenError::TransportError(msg)
            | TaskGenError::ConfigError(msg) => msg.clone(),
            TaskGenError::SerializationError(err) => err.to_string(),
        };

        if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message
        }
    }
}

pub type Result<T> = std::result::Result<T, TaskGenError>;
