use crate::core::prompt::SYSTEM_INSTRUCTION;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Low temperature keeps verdicts stable between refreshes
pub const TEMPERATURE: f32 = 0.3;
pub const MAX_TOKENS: u32 = 2000;

/// Errors that can occur when calling the reasoning service
#[derive(Debug, Error)]
pub enum ReasoningError {
    #[error("Reasoning service API key is not configured")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("API returned error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Reasoning service returned no content")]
    EmptyResponse,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// A service that answers a matching prompt with free text
///
/// Implementations make a single attempt; retries are layered on top with
/// [`crate::services::retry::Retrying`].
#[async_trait]
pub trait ReasoningService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, ReasoningError>;
}

#[async_trait]
impl<T: ReasoningService + ?Sized> ReasoningService for Arc<T> {
    async fn complete(&self, prompt: &str) -> Result<String, ReasoningError> {
        (**self).complete(prompt).await
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completion client for an OpenAI-compatible API
///
/// Knows nothing about matching: it sends the fixed system instruction plus
/// the given prompt and hands back the text of the first choice.
pub struct OpenAiClient {
    base_url: String,
    api_key: Option<String>,
    model: String,
    client: Client,
}

impl OpenAiClient {
    /// Create a new client. A missing key is only reported when a call is made.
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        model: String,
        timeout: Duration,
    ) -> Result<Self, ReasoningError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model,
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl ReasoningService for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, ReasoningError> {
        let api_key = self.api_key.as_deref().ok_or(ReasoningError::MissingApiKey)?;

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_INSTRUCTION,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let start = std::time::Instant::now();

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = classify_error(status, &body);
            tracing::warn!("Reasoning service error: {}", error);
            return Err(error);
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| ReasoningError::InvalidResponse(e.to_string()))?;

        tracing::debug!(
            "Reasoning service answered in {}ms (model: {})",
            start.elapsed().as_millis(),
            self.model
        );

        chat.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ReasoningError::EmptyResponse)
    }
}

/// Map a non-success status and body to the matching error
fn classify_error(status: StatusCode, body: &str) -> ReasoningError {
    let json: Option<Value> = serde_json::from_str(body).ok();
    let error = json.as_ref().and_then(|v| v.get("error"));

    let message = error
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().to_string());

    if status != StatusCode::TOO_MANY_REQUESTS {
        return ReasoningError::ApiError {
            status: status.as_u16(),
            message,
        };
    }

    let quota_code = ["code", "type"].iter().any(|field| {
        error
            .and_then(|e| e.get(*field))
            .and_then(|v| v.as_str())
            .is_some_and(|v| v == "insufficient_quota")
    });

    if quota_code || message.to_lowercase().contains("quota") {
        ReasoningError::QuotaExceeded(message)
    } else {
        ReasoningError::RateLimited(message)
    }
}
