//! Chat-completions client for the hosted model.
//!
//! Thin wrapper over the OpenAI-compatible API. Transient failures are
//! retried with exponential backoff; quota exhaustion is surfaced as a
//! typed error so callers can convert it into a skip instead of a crash.

use crate::config::Settings;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Error)]
pub enum LlmError {
    /// The hosted model rejected the request for quota/rate reasons.
    /// Not retried: quota does not clear on a millisecond backoff.
    #[error("model quota exhausted: {0}")]
    RateLimited(String),

    #[error("chat API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to decode chat response: {0}")]
    Decode(String),

    #[error("chat API returned no choices")]
    EmptyResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Clone)]
pub struct LLMClient {
    client: Client,
    api_key: String,
    base_url: String,
    settings: Settings,
}

impl LLMClient {
    pub fn new(api_key: String, settings: Settings) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            settings,
        }
    }

    /// Point the client at a different OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: self.settings.llm.model.clone(),
            messages,
            max_tokens: self.settings.llm.max_tokens,
            temperature: self.settings.llm.temperature,
        };

        const MAX_RETRIES: u32 = 3;
        const BASE_DELAY_MS: u64 = 1000;

        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = BASE_DELAY_MS * 2_u64.pow(attempt - 1);
                tracing::warn!(
                    "[LLMClient] Retrying API call (attempt {}/{}) after {}ms delay",
                    attempt + 1,
                    MAX_RETRIES,
                    delay
                );
                tokio::time::sleep(tokio::time::Duration::from_millis(delay)).await;
            }

            let response_result = self
                .client
                .post(format!("{}/chat/completions", self.base_url))
                .header("Authorization", format!("Bearer {}", self.api_key))
                .header("Content-Type", "application/json")
                .json(&request)
                .send()
                .await;

            let response = match response_result {
                Ok(resp) => resp,
                Err(e) => {
                    tracing::warn!("[LLMClient] HTTP request failed: {}", e);
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();
            if !status.is_success() {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());

                if status.as_u16() == 429 || body.contains("insufficient_quota") {
                    return Err(LlmError::RateLimited(body));
                }

                tracing::warn!("[LLMClient] API returned error status {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    body,
                });
                continue;
            }

            let chat_response = match response.json::<ChatResponse>().await {
                Ok(cr) => cr,
                Err(e) => {
                    tracing::warn!("[LLMClient] Failed to decode response body: {}", e);
                    last_error = Some(LlmError::Decode(e.to_string()));
                    continue;
                }
            };

            return chat_response
                .choices
                .first()
                .map(|c| c.message.content.clone())
                .ok_or(LlmError::EmptyResponse);
        }

        Err(last_error.unwrap_or(LlmError::EmptyResponse))
    }
}
