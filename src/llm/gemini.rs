//! Client for the Gemini `generateContent` endpoint.
//!
//! One endpoint serves both operations. The request envelope carries a list
//! of `contents`; the response carries zero or more `candidates`, each with
//! ordered text `parts` that are concatenated into the answer.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::provider::{InferenceProvider, interpret_label};
use crate::config::LlmConfig;
use crate::error::{ConfigError, LlmError};
use crate::pipeline::types::Classification;

const PROVIDER: &str = "gemini";

/// Max bytes of an error body kept in `LlmError::HttpStatus`.
const ERROR_BODY_LIMIT: usize = 200;

// ── Envelope types ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_settings: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Single user turn with one text part.
    pub fn user_prompt(text: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part { text: text.into() }],
            }],
            safety_settings: None,
            generation_config: None,
        }
    }

    pub fn with_generation_config(mut self, config: GenerationConfig) -> Self {
        self.safety_settings = Some(Vec::new());
        self.generation_config = Some(config);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl GenerationConfig {
    /// Sampling used for reply drafting.
    pub fn reply() -> Self {
        Self {
            temperature: 0.4,
            top_k: 40,
            top_p: 0.9,
            max_output_tokens: 256,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, or `None` when the
    /// response has no candidates at all.
    pub fn first_text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        Some(
            candidate
                .content
                .as_ref()
                .map(|c| c.parts.iter().map(|p| p.text.as_str()).collect())
                .unwrap_or_default(),
        )
    }
}

// ── Prompts ─────────────────────────────────────────────────────────

fn classify_prompt(content: &str) -> String {
    format!(
        "Classify the email strictly as either 'Productive' or 'Unproductive'.\n\
         Return ONLY the single word: Productive or Unproductive.\n\n\
         Email:\n{content}"
    )
}

fn reply_prompt(content: &str, classification: Classification) -> String {
    format!(
        "Context classification: {classification}.\n\
         Email content:\n{content}\n\n\
         Draft a helpful reply."
    )
}

// ── Client ──────────────────────────────────────────────────────────

/// Gemini-backed inference provider.
pub struct GeminiClient {
    api_key: Option<SecretString>,
    model: String,
    api_base: String,
    client: Client,
}

impl GeminiClient {
    pub fn new(config: &LlmConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    /// Issue one request. Transport and status failures are errors; the
    /// body is returned raw so each operation can decide how to parse it.
    async fn post(
        &self,
        api_key: &SecretString,
        request: &GenerateContentRequest,
    ) -> Result<String, LlmError> {
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key.expose_secret())])
            .json(request)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed {
                provider: PROVIDER.into(),
                reason: transport_reason(e),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| LlmError::RequestFailed {
            provider: PROVIDER.into(),
            reason: transport_reason(e),
        })?;

        if !status.is_success() {
            return Err(LlmError::HttpStatus {
                provider: PROVIDER.into(),
                status: status.as_u16(),
                body: truncate(&body, ERROR_BODY_LIMIT),
            });
        }
        Ok(body)
    }
}

/// Describe a transport failure. The URL carries the key, so it is stripped
/// before anything reaches the error or the logs.
fn transport_reason(e: reqwest::Error) -> String {
    let kind = if e.is_timeout() {
        "timed out"
    } else if e.is_connect() {
        "connect failed"
    } else {
        "transport error"
    };
    format!("{kind}: {}", e.without_url())
}

fn parse_envelope(body: &str) -> Result<GenerateContentResponse, LlmError> {
    serde_json::from_str(body).map_err(|e| LlmError::InvalidResponse {
        provider: PROVIDER.into(),
        reason: format!("JSON parse error: {e}"),
    })
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

#[async_trait]
impl InferenceProvider for GeminiClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn classify(&self, content: &str) -> Result<Classification, LlmError> {
        let api_key = self.api_key.as_ref().ok_or_else(|| LlmError::MissingApiKey {
            provider: PROVIDER.into(),
        })?;

        let request = GenerateContentRequest::user_prompt(classify_prompt(content));
        let body = self.post(api_key, &request).await?;
        let text = parse_envelope(&body)?
            .first_text()
            .ok_or_else(|| LlmError::InvalidResponse {
                provider: PROVIDER.into(),
                reason: "no candidates".into(),
            })?;

        let label = interpret_label(&text);
        debug!(model = %self.model, raw = %text.trim(), label = %label, "Remote classification");
        Ok(label)
    }

    async fn generate_reply(
        &self,
        content: &str,
        classification: Classification,
    ) -> Result<String, LlmError> {
        let canned = classification.canned_reply();
        let Some(api_key) = self.api_key.as_ref() else {
            debug!("No API key configured, using canned reply");
            return Ok(canned.to_string());
        };

        let request = GenerateContentRequest::user_prompt(reply_prompt(content, classification))
            .with_generation_config(GenerationConfig::reply());

        let body = match self.post(api_key, &request).await {
            Ok(body) => body,
            Err(e @ LlmError::HttpStatus { .. }) => {
                warn!(error = %e, "Reply generation rejected, using canned reply");
                return Ok(canned.to_string());
            }
            Err(e) => return Err(e),
        };

        let text = match parse_envelope(&body).map(|r| r.first_text()) {
            Ok(Some(text)) => text,
            Ok(None) => {
                warn!("Reply response had no candidates, using canned reply");
                return Ok(canned.to_string());
            }
            Err(e) => {
                warn!(error = %e, "Reply response unreadable, using canned reply");
                return Ok(canned.to_string());
            }
        };

        let reply = text.trim();
        if reply.is_empty() {
            Ok(canned.to_string())
        } else {
            Ok(reply.to_string())
        }
    }
}
