// Trip-planning assistant backed by a hosted language model.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Answers one user message. No conversation context is sent along.
#[async_trait]
pub trait AssistantModel: Send + Sync {
    async fn reply(&self, message: &str) -> anyhow::Result<String>;
}

/// Gemini `generateContent` client.
pub struct GeminiAssistant {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Deserialize)]
struct ReplyPart {
    #[serde(default)]
    text: String,
}

impl GeminiAssistant {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, GEMINI_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait]
impl AssistantModel for GeminiAssistant {
    async fn reply(&self, message: &str) -> anyhow::Result<String> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body: GenerateResponse = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateRequest {
                contents: [Content {
                    parts: [Part { text: message }],
                }],
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let text: String = body
            .candidates
            .into_iter()
            .next()
            .map(|c| c.content.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();
        if text.trim().is_empty() {
            anyhow::bail!("model {} returned no text", self.model);
        }
        Ok(text)
    }
}

/// Used when no model API key is configured.
pub struct DisabledAssistant;

#[async_trait]
impl AssistantModel for DisabledAssistant {
    async fn reply(&self, _message: &str) -> anyhow::Result<String> {
        Err(anyhow::anyhow!("the assistant is not configured"))
    }
}
