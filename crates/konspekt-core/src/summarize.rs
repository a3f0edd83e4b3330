use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    error::{NotesError, Result},
    provider::GeminiConfig,
};

/// Instruction prepended to every transcript sent for summarization.
pub const NOTES_PROMPT: &str = "You are a YouTube video summarizer. You will get the transcript \
text of a YouTube video, and your task is to summarize the entire video into important points \
in under 250 words. Here is the transcript:";

/// Turns a transcript into condensed notes.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, transcript: &str) -> Result<String>;
}

/// One model row from the debug listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

/// Client for the Gemini generative-language API.
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// List the models available to the configured key. Operator debug
    /// affordance; never part of the main flow.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let url = format!("{}/models", self.config.api_base);
        let response = self
            .http
            .get(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .send()
            .await
            .map_err(|e| NotesError::ModelListFailed {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotesError::ModelListFailed {
                reason: format!("service answered {status}: {body}"),
            });
        }

        let parsed: ModelsResponse =
            response.json().await.map_err(|e| NotesError::ModelListFailed {
                reason: e.to_string(),
            })?;
        Ok(parsed.models)
    }
}

#[async_trait]
impl Summarizer for GeminiClient {
    async fn summarize(&self, transcript: &str) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.api_base, self.config.model
        );
        let body = serde_json::json!({
            "contents": [{
                "parts": [{ "text": format!("{NOTES_PROMPT}\n{transcript}") }]
            }]
        });

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| NotesError::SummaryFailed {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotesError::SummaryFailed {
                reason: format!("service answered {status}: {body}"),
            });
        }

        let parsed: GenerateResponse =
            response.json().await.map_err(|e| NotesError::SummaryFailed {
                reason: format!("unreadable response: {e}"),
            })?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| NotesError::SummaryFailed {
                reason: "response carried no generated text".to_string(),
            })
    }
}
