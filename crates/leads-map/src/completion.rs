//! Text-completion collaborator interface and HTTP implementation.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MapError, Result};

/// HTTP request timeout for completion calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(45);

/// An external text-completion service.
///
/// The AI-assisted mapper only needs a single prompt-in, text-out call;
/// tests substitute canned implementations.
pub trait CompletionClient: Send + Sync {
    /// Sends one prompt and returns the raw completion text.
    fn complete(&self, prompt: &str) -> Result<String>;
}

/// Connection settings for [`HttpCompletionClient`].
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// Base URL of an OpenAI-compatible API, without a trailing slash.
    pub base_url: String,
    /// Bearer token.
    pub api_key: String,
    /// Model identifier to request.
    pub model: String,
}

/// Client for an OpenAI-style chat-completions endpoint.
pub struct HttpCompletionClient {
    client: Client,
    config: CompletionConfig,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl HttpCompletionClient {
    /// Creates a new completion client.
    pub fn new(config: CompletionConfig) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }
}

impl CompletionClient for HttpCompletionClient {
    fn complete(&self, prompt: &str) -> Result<String> {
        debug!(model = %self.config.model, "requesting header mapping completion");

        let body = ChatRequest {
            model: &self.config.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.0,
        };

        let response = self
            .client
            .post(self.completions_url())
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .json(&body)
            .send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().unwrap_or_else(|_| "unknown error".to_string());
            return Err(MapError::Completion(format!("status {status}: {message}")));
        }

        let parsed: ChatResponse = response.json()?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| MapError::Completion("response contained no choices".to_string()))
    }
}
