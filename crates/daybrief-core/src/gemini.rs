//! Typed client for the Gemini `generateContent` endpoint.
//!
//! Wire contract: `POST {base_url}/models/{model}:generateContent?key=...`
//! with `{contents, generationConfig}`, where `generationConfig` optionally
//! carries `responseMimeType`/`responseSchema` for structured output. The
//! response text lives at `candidates[0].content.parts[0].text`.

use crate::error::{DaybriefError, Result};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(rename = "responseSchema", skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentRequest {
    /// Single-turn request for `prompt`, with structured output when a
    /// schema is attached.
    pub fn single_turn(prompt: &str, schema: Option<Value>) -> Self {
        let generation_config = match schema {
            Some(schema) => GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(schema),
            },
            None => GenerationConfig {
                response_mime_type: None,
                response_schema: None,
            },
        };

        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config,
        }
    }
}

/// A connected Gemini client. Holds no per-request state; one instance is
/// shared across all proxy invocations.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    http: HttpClient,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            http: HttpClient::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Build a client from `GEMINI_API_KEY` (or the legacy `API_KEY`).
    /// A missing credential is a configuration error, detected here before
    /// any network call.
    pub fn from_env() -> Result<Self> {
        std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .filter(|k| !k.is_empty())
            .map(Self::new)
            .ok_or(DaybriefError::MissingApiKey)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Issue exactly one completion call and return the response text.
    ///
    /// Non-2xx statuses surface as [`DaybriefError::Upstream`] with the
    /// status code and raw body; a response with no candidates yields the
    /// empty string (the caller decides whether that is a failure).
    pub async fn generate(&self, prompt: &str, schema: Option<Value>) -> Result<String> {
        let request = GenerateContentRequest::single_turn(prompt, schema);
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self.http.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(DaybriefError::Upstream { status, body });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .unwrap_or_default();

        Ok(text)
    }
}
