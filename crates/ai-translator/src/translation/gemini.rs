use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::TranslationError;
use crate::config::{ApiKey, GeminiConfig};

/// Text-in, text-out model behind the translation service.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, TranslationError>;

    fn name(&self) -> &str;
}

/// Client for the Gemini `generateContent` endpoint. Sends exactly one
/// request per call.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: ApiKey,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self, TranslationError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        let endpoint = format!(
            "{}/models/{}:generateContent",
            config.api_base.trim_end_matches('/'),
            config.model
        );

        Ok(Self {
            http,
            endpoint,
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, TranslationError> {
        debug!(model = %self.model, "sending generateContent request");

        let response = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", self.api_key.expose())
            .json(&GenerateContentRequest::single(prompt))
            .send()
            .await?;

        let status = response.status();
        debug!(%status, "generateContent responded");

        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            return Err(TranslationError::Upstream {
                status: status.as_u16(),
                message: upstream_message(&raw, status.canonical_reason()),
            });
        }

        let payload: GenerateContentResponse = response.json().await?;
        payload.into_text()
    }

    fn name(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    fn single(text: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl GenerateContentResponse {
    /// Joins the text parts of the first candidate.
    fn into_text(self) -> Result<String, TranslationError> {
        let GenerateContentResponse {
            candidates,
            prompt_feedback,
        } = self;

        let text: String = candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
            .unwrap_or_default();

        if !text.is_empty() {
            return Ok(text);
        }

        match prompt_feedback.and_then(|feedback| feedback.block_reason) {
            Some(reason) => Err(TranslationError::Blocked(reason)),
            None => Err(TranslationError::EmptyResponse),
        }
    }
}

fn upstream_message(raw: &str, fallback: Option<&str>) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(raw) {
        return envelope.error.message;
    }

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        fallback.unwrap_or("no response body").to_string()
    } else {
        trimmed.to_string()
    }
}
