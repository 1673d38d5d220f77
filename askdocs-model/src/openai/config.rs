//! OpenAI backend configuration.

use askdocs_core::{CoreError, Result};

/// The default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Configuration for [`OpenAIChatModel`](super::OpenAIChatModel).
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key.
    pub api_key: String,
    /// Model name (e.g. `gpt-4o`).
    pub model: String,
    /// Override the API base URL for OpenAI-compatible services.
    pub base_url: Option<String>,
}

impl OpenAIConfig {
    /// Configuration with an explicit key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), model: model.into(), base_url: None }
    }

    /// Read the key from `OPENAI_API_KEY`, failing fast when absent.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| CoreError::Config("Missing `OPENAI_API_KEY` environment variable".into()))?;
        Ok(Self::new(api_key, DEFAULT_MODEL))
    }

    /// Use a different model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}
