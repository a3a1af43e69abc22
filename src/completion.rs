use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::timeout;
use tracing::debug;

/// Sampling temperature sent with every completion request.
const TEMPERATURE: f64 = 0.7;
const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion request timed out")]
    Timeout,
    #[error("failed to reach completion service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("completion service returned {status}: {body}")]
    UpstreamStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("completion service returned an unreadable response: {0}")]
    MalformedResponse(String),
    #[error("completion service returned an empty completion")]
    EmptyCompletion,
}

/// One outbound call per invocation; no retry, no caching. Handlers depend on
/// this trait so tests can substitute a fake service.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f64,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Client for the OpenAI chat-completions wire format. The base URL is
/// configurable so tests can point it at a local mock server.
pub struct OpenAiClient {
    client: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl OpenAiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Self {
        let url = format!("{}{CHAT_COMPLETIONS_PATH}", base_url.trim_end_matches('/'));
        Self {
            client: reqwest::Client::new(),
            url,
            api_key: api_key.into(),
            model: model.into(),
            timeout,
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let payload = ChatRequest {
            model: &self.model,
            temperature: TEMPERATURE,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!(url = %self.url, model = %self.model, "sending completion request");

        let fut = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send();

        let response = timeout(self.timeout, fut)
            .await
            .map_err(|_| CompletionError::Timeout)??;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response body>".to_string());
            return Err(CompletionError::UpstreamStatus { status, body });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|err| CompletionError::MalformedResponse(err.to_string()))?;

        let answer = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .unwrap_or_default();

        if answer.is_empty() {
            return Err(CompletionError::EmptyCompletion);
        }

        Ok(answer)
    }
}
