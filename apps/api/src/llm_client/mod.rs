/// LLM Client — the single point of entry for all model calls in the screener.
///
/// ARCHITECTURAL RULE: No other module may call the Groq API directly.
/// All LLM interactions MUST go through a `ModelClient`.
///
/// Model: llama-3.3-70b-versatile (hardcoded — do not make configurable to prevent drift)
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// The model used for all LLM calls in the screener.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "llama-3.3-70b-versatile";
pub const PROVIDER_NAME: &str = "Groq";
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Arguments of a single model call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

/// The "call model" capability: prompt in, raw text out.
///
/// Carried by the evaluator as `Arc<dyn ModelClient>` so tests can inject
/// canned responses instead of hitting the network.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

/// Model provider state, built once at startup.
#[derive(Clone)]
pub enum Provider {
    Ready(Arc<dyn ModelClient>),
    Unavailable(String),
}

impl Provider {
    pub fn is_available(&self) -> bool {
        matches!(self, Provider::Ready(_))
    }

    /// Builds the Groq provider from an optional API key.
    /// A missing key or a client build failure leaves the provider unavailable
    /// instead of aborting startup.
    pub fn groq(api_key: Option<String>) -> Self {
        let Some(api_key) = api_key else {
            return Provider::Unavailable(
                "GROQ_API_KEY not found in environment variables".to_string(),
            );
        };
        match GroqClient::new(api_key) {
            Ok(client) => Provider::Ready(Arc::new(client)),
            Err(e) => Provider::Unavailable(format!("Failed to build HTTP client: {e}")),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Extracts the trimmed text content of the first choice.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Groq chat-completions client (OpenAI-compatible wire format).
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    api_key: String,
}

impl GroqClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
        })
    }

    /// Makes a raw call to the Groq API, returning the full response object.
    /// No retries: a failed call is surfaced to the caller as-is.
    pub async fn call(&self, request: &CompletionRequest) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            top_p: request.top_p,
        };

        let response = self
            .client
            .post(GROQ_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), body));
        }

        let chat_response: ChatResponse = response.json().await?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat_response)
    }
}

#[async_trait]
impl ModelClient for GroqClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let response = self.call(request).await?;
        response
            .text()
            .map(String::from)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Builds an `LlmError::Api`, preferring the provider's own error message.
fn api_error(status: u16, body: String) -> LlmError {
    let message = serde_json::from_str::<ApiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    LlmError::Api { status, message }
}
