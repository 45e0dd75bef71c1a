use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

use crate::config::AppConfig;

#[derive(Debug, Clone, PartialEq)]
pub enum GatewayError {
    MissingCredential,
    Request(String),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::MissingCredential => write!(f, "GOOGLE_API_KEY not set"),
            GatewayError::Request(msg) => write!(f, "Generation request failed: {}", msg),
        }
    }
}

impl Error for GatewayError {}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Request(err.to_string())
    }
}

/// Prompt in, raw plan text out. Retry or backoff policies wrap this trait;
/// the parser and presenter never see the transport.
#[async_trait]
pub trait PlanGateway: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError>;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

/// Gemini `generateContent` over HTTPS.
#[derive(Clone)]
pub struct GeminiGateway {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiGateway {
    pub fn new(api_key: Option<String>, model: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            base_url,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.api_key.clone(),
            config.gemini_model.clone(),
            config.gemini_base_url.clone(),
        )
    }

    fn endpoint(&self, api_key: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        )
    }
}

#[async_trait]
impl PlanGateway for GeminiGateway {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        let api_key = self.api_key.as_deref().ok_or(GatewayError::MissingCredential)?;

        log::debug!("Requesting plan from {} ({} prompt chars)", self.model, prompt.len());

        let request = GenerateContentRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint(api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GatewayError::Request(format!(
                "Gemini returned status {}: {}",
                status, error_text
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Request(format!("Failed to parse response: {}", e)))?;

        if let Some(reason) = body.prompt_feedback.and_then(|feedback| feedback.block_reason) {
            return Err(GatewayError::Request(format!("Prompt was blocked: {}", reason)));
        }

        let candidate = body
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::Request("Response contained no candidates".to_string()))?;

        let text: String = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if text.is_empty() {
            let reason = candidate.finish_reason.unwrap_or_else(|| "UNKNOWN".to_string());
            return Err(GatewayError::Request(format!(
                "Response contained no text (finish reason: {})",
                reason
            )));
        }

        Ok(text)
    }
}
