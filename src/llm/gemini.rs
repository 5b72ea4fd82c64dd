use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::llm::{GenerationBackend, GenerationError};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for the Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key (from GOOGLE_API_KEY env var)
    pub api_key: String,
    /// Model to use (e.g., "gemini-1.5-flash")
    pub model: String,
    /// Sampling temperature
    pub temperature: f64,
    /// Optional cap on generated tokens
    pub max_output_tokens: Option<u32>,
    /// API root, without trailing slash
    pub base_url: String,
}

impl GeminiConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self, GenerationError> {
        let api_key = std::env::var("GOOGLE_API_KEY")
            .map_err(|_| GenerationError::MissingApiKey("GOOGLE_API_KEY"))?;

        Ok(Self::new(api_key, "gemini-1.5-flash".to_string()))
    }

    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            temperature: 0.5,
            max_output_tokens: None,
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// Gemini `generateContent` client
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Send one system instruction plus one user turn and return the text
    pub async fn generate_content(
        &self,
        system: &str,
        user: &str,
    ) -> Result<String, GenerationError> {
        let request = build_request(&self.config, system, user);

        let response = self
            .client
            .post(self.config.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api { status, body });
        }

        let response: GenerateContentResponse = response.json().await?;
        candidate_text(&response).ok_or(GenerationError::EmptyResponse)
    }
}

#[async_trait]
impl GenerationBackend for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, system: &str, prompt: &str) -> Result<String, GenerationError> {
        self.generate_content(system, prompt).await
    }
}

fn build_request(config: &GeminiConfig, system: &str, user: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part::text(user)],
        }],
        system_instruction: Some(Content {
            role: None,
            parts: vec![Part::text(system)],
        }),
        generation_config: GenerationConfig {
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        },
    }
}

/// Concatenate the text parts of the first candidate
fn candidate_text(response: &GenerateContentResponse) -> Option<String> {
    let content = response.candidates.first()?.content.as_ref()?;
    let text: String = content
        .parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl Part {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}
