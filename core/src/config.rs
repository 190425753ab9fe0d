//! Settings for a conversation view.
//!
//! Everything here is passed in explicitly; the core never reads the process
//! environment to find its endpoint.

use serde::Deserialize;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

use crate::classifier::FallbackMessages;
use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Client-side budget for one `/chat` exchange.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(45_000);

pub const DEFAULT_GREETING: &str = "Hello! I'm your AI assistant for Saridena Constructions. I can help you with information about our luxury villas, pricing, amenities, and more. How can I assist you today?";

pub const DEFAULT_SUGGESTED_PROMPTS: [&str; 4] = [
    "What villa sizes do you offer?",
    "What are the prices?",
    "Tell me about amenities",
    "How can I contact you?",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConciergeConfig {
    /// Base URL of the chat backend; requests go to `{base_url}/chat`.
    pub base_url: String,
    pub request_timeout_ms: u64,
    /// Seeded as the first assistant message of every session.
    pub greeting: String,
    pub suggested_prompts: Vec<String>,
    pub fallback: FallbackMessages,
}

impl Default for ConciergeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT.as_millis() as u64,
            greeting: DEFAULT_GREETING.to_string(),
            suggested_prompts: DEFAULT_SUGGESTED_PROMPTS
                .iter()
                .map(ToString::to_string)
                .collect(),
            fallback: FallbackMessages::default(),
        }
    }
}

impl ConciergeConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: "base_url cannot be empty".to_string(),
            });
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                message: format!("base_url must be an http(s) URL: {}", self.base_url),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                message: "request_timeout_ms must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
