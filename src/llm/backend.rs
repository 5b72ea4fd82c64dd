use std::sync::Arc;

use async_trait::async_trait;
use clap::ValueEnum;
use thiserror::Error;

use crate::llm::{AnthropicClient, AnthropicConfig, GeminiClient, GeminiConfig};

/// Errors raised while talking to a generation backend
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("{0} environment variable not set")]
    MissingApiKey(&'static str),
    #[error("failed to reach generation backend: {0}")]
    Http(#[from] reqwest::Error),
    #[error("generation backend error: {status} - {body}")]
    Api { status: u16, body: String },
    #[error("no text content in response")]
    EmptyResponse,
}

/// A large-language-model service that turns a system prompt and a user
/// prompt into generated text.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Short provider name used in logs
    fn name(&self) -> &str;

    /// Generate a completion for one prompt
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, GenerationError>;
}

/// Which provider to build a backend for
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// Google Gemini (GOOGLE_API_KEY)
    Gemini,
    /// Anthropic Claude (ANTHROPIC_API_KEY)
    Anthropic,
}

impl BackendKind {
    /// Build a shareable backend, reading the API key from the environment
    pub fn build(
        self,
        model: Option<String>,
        temperature: Option<f64>,
    ) -> Result<Arc<dyn GenerationBackend>, GenerationError> {
        let backend: Arc<dyn GenerationBackend> = match self {
            BackendKind::Gemini => {
                let mut config = GeminiConfig::from_env()?;
                if let Some(model) = model {
                    config.model = model;
                }
                if let Some(temperature) = temperature {
                    config.temperature = temperature;
                }
                Arc::new(GeminiClient::new(config))
            }
            BackendKind::Anthropic => {
                let mut config = AnthropicConfig::from_env()?;
                if let Some(model) = model {
                    config.model = model;
                }
                if let Some(temperature) = temperature {
                    config.temperature = temperature;
                }
                Arc::new(AnthropicClient::new(config))
            }
        };
        Ok(backend)
    }
}
