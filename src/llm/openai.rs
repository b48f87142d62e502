//! `OpenAI`-compatible chat-completions client
//!
//! Works against hosted endpoints (bearer key) and locally served models that
//! expose the same `/chat/completions` route without authentication.

use super::endpoint::ModelEndpoint;
use super::types::{LlmMessage, LlmRequest, LlmResponse, Usage};
use super::{LlmError, LlmService};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI-compatible service implementation
pub struct OpenAIService {
    client: Client,
    endpoint: ModelEndpoint,
    url: String,
}

impl OpenAIService {
    pub fn new(endpoint: ModelEndpoint) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            url: endpoint.completions_url(),
            endpoint,
        }
    }

    fn translate_request(&self, request: &LlmRequest) -> OpenAIRequest {
        OpenAIRequest {
            model: self.endpoint.model.clone(),
            messages: request.messages.clone(),
            temperature: request.temperature,
        }
    }

    /// Map an HTTP status and body to a response or a classified error.
    ///
    /// A successful status with a blank body is a transport failure; a body
    /// that is present but not a chat completion is a protocol failure.
    pub(crate) fn classify(status: StatusCode, body: &str) -> Result<LlmResponse, LlmError> {
        if !status.is_success() {
            let message = serde_json::from_str::<OpenAIErrorResponse>(body)
                .map_or_else(|_| body.trim().to_string(), |e| e.error.message);
            return Err(match status.as_u16() {
                401 | 403 => LlmError::auth(format!("Authentication failed: {message}")),
                429 => LlmError::rate_limit(format!("Rate limit exceeded: {message}")),
                400 => LlmError::invalid_request(format!("Invalid request: {message}")),
                500..=599 => LlmError::server_error(format!("Server error: {message}")),
                _ => LlmError::unknown(format!("HTTP {status}: {message}")),
            });
        }

        if body.trim().is_empty() {
            return Err(LlmError::empty_body(format!("HTTP {status} with empty body")));
        }

        Self::normalize_response(body)
    }

    /// Parse a response body into the first choice's content.
    ///
    /// Anything other than `{ choices: [ { message: { content } } ] }` is a
    /// protocol error; no default is substituted.
    pub(crate) fn normalize_response(body: &str) -> Result<LlmResponse, LlmError> {
        let resp: OpenAIResponse = serde_json::from_str(body)
            .map_err(|e| LlmError::protocol(format!("Failed to parse response: {e} - body: {body}")))?;

        let choice = resp
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::protocol("No choices in response"))?;

        let usage = resp.usage.map_or_else(Usage::default, |u| Usage {
            input_tokens: u64::from(u.prompt_tokens),
            output_tokens: u64::from(u.completion_tokens),
        });

        Ok(LlmResponse {
            text: choice.message.content,
            usage,
        })
    }
}

#[async_trait]
impl LlmService for OpenAIService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let openai_request = self.translate_request(request);

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", self.endpoint.authorization())
            .header("Content-Type", "application/json")
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    LlmError::network(format!("Connection failed: {e}"))
                } else {
                    LlmError::unknown(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::network(format!("Failed to read response: {e}")))?;

        Self::classify(status, &body)
    }

    fn model_id(&self) -> &str {
        &self.endpoint.model
    }
}

// OpenAI API types

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<LlmMessage>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
    #[serde(default)]
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
#[allow(clippy::struct_field_names)]
struct OpenAIUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorResponse {
    error: OpenAIError,
}

#[derive(Debug, Deserialize)]
struct OpenAIError {
    message: String,
}
