//! Configuration resolution: `.env` files, environment variables and
//! command-line overrides, in increasing order of precedence.

use crate::error::{Result, TaskGenError};
use crate::llm::gateways::GroqConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Load variables from a `.env` file into the process environment.
///
/// Without an explicit path the usual lookup applies and a missing file is not
/// an error. An explicit path must exist. Variables already set are kept.
pub fn load_dotenv(path: Option<&Path>) -> Result<Option<PathBuf>> {
    match path {
        Some(path) => {
            dotenv::from_path(path).map_err(|err| {
                TaskGenError::ConfigError(format!("cannot load {}: {}", path.display(), err))
            })?;
            debug!(path = %path.display(), "Loaded environment file");
            Ok(Some(path.to_path_buf()))
        }
        None => match dotenv::dotenv() {
            Ok(found) => {
                debug!(path = %found.display(), "Loaded environment file");
                Ok(Some(found))
            }
            Err(_) => Ok(None),
        },
    }
}

/// Values given explicitly by the caller; each one wins over the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Overrides {
    pub fn apply(self, mut config: GroqConfig) -> GroqConfig {
        if let Some(api_key) = self.api_key {
            config.api_key = api_key;
        }
        if let Some(base_url) = self.base_url {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(model) = self.model {
            config.model = model;
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = Some(Duration::from_secs(secs));
        }
        config
    }
}

/// Resolve the Groq connection settings from the environment plus overrides.
pub fn resolve(overrides: Overrides) -> GroqConfig {
    overrides.apply(GroqConfig::from_env())
}
