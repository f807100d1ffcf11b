//! HTTP client for an OpenAI-compatible chat-completion API

use crate::config::LlmSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Failure modes of a completion call. All of them translate to the same
/// external dependency error; the distinction here is for logs and messages.
#[derive(Debug, Error)]
pub enum LlmFailure {
    #[error("no API key configured for the completion provider")]
    MissingKey,

    #[error("completion transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("completion provider returned status {code}: {body}")]
    Status { code: u16, body: String },

    #[error("unexpected completion response: {0}")]
    Decode(String),

    #[error("completion response contained no choices")]
    EmptyChoices,
}

impl LlmFailure {
    /// Status code the provider answered with, when the call got that far.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Chat-completion client. Model, sampling parameters and endpoint all come
/// from settings; an empty API key makes every call fail fast.
pub struct LlmClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
}

impl LlmClient {
    pub fn new(settings: &LlmSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }

    /// Issue a single completion with a system instruction and user content.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, LlmFailure> {
        if self.api_key.is_empty() {
            return Err(LlmFailure::MissingKey);
        }

        let url = format!("{}/chat/completions", self.api_base);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!("requesting completion from {} ({})", url, self.model);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let code = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmFailure::Status { code, body });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmFailure::Decode(e.to_string()))?;
        let choice = parsed.choices.into_iter().next().ok_or(LlmFailure::EmptyChoices)?;
        Ok(choice.message.content)
    }
}
