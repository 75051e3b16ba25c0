//! Client for the OpenAI-compatible chat-completions API.
//!
//! # Responsibilities
//! - Build the messages array (optional system message, then user prompt)
//! - POST to `{base}/chat/completions` with bearer auth
//! - Retry rate-limit/server/network failures with capped backoff
//! - Extract the first choice's content from the response

use axum::http::StatusCode;
use std::time::Duration;
use thiserror::Error;

use crate::config::Settings;
use crate::llm::types::{
    ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse, ChatMessage,
};
use crate::resilience::{is_retryable_status, RetryPolicy};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Error type for LLM API calls.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("OPENAI_API_KEY is not configured")]
    MissingApiKey,

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("request to LLM API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("LLM API returned {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("LLM API response contained no choices")]
    EmptyResponse,
}

/// Handle to the upstream chat-completions API.
pub struct LlmClient {
    http: reqwest::Client,
    completions_url: String,
    api_key: String,
    model: String,
    retry: RetryPolicy,
}

impl LlmClient {
    /// Build a client from the process settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.llm_timeout_secs))
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(LlmError::ClientBuild)?;

        let completions_url = format!(
            "{}/chat/completions",
            settings.openai_base_url.trim_end_matches('/')
        );

        Ok(Self {
            http,
            completions_url,
            api_key: settings.openai_api_key.clone(),
            model: settings.llm_model.clone(),
            retry: RetryPolicy::new(
                settings.llm_max_retries,
                settings.llm_retry_base_delay_ms,
                settings.llm_retry_max_delay_ms,
            ),
        })
    }

    /// Ask the model a single question, optionally framed by a system prompt.
    ///
    /// Returns the first choice's content; a null content counts as an empty
    /// completion, not an error.
    pub async fn chat(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        temperature: f32,
        max_tokens: Option<u32>,
    ) -> Result<String, LlmError> {
        if self.api_key.is_empty() {
            return Err(LlmError::MissingApiKey);
        }

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system_prompt {
            messages.push(ChatMessage::system(system));
        }
        messages.push(ChatMessage::user(prompt));

        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            temperature,
            max_tokens,
        };

        let mut attempts = 0;
        loop {
            attempts += 1;

            let sent = self
                .http
                .post(&self.completions_url)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await;

            match sent {
                Ok(response) if response.status().is_success() => {
                    let completion: ChatCompletionResponse = response.json().await?;
                    let choice = completion
                        .choices
                        .into_iter()
                        .next()
                        .ok_or(LlmError::EmptyResponse)?;
                    return Ok(choice.message.content.unwrap_or_default());
                }
                Ok(response) => {
                    let status = response.status();
                    if is_retryable_status(status) && self.retry.allows_retry(attempts) {
                        let delay = self.retry.delay_after(attempts);
                        tracing::warn!(
                            attempt = attempts,
                            status = %status,
                            delay = ?delay,
                            "Retrying LLM request"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    let message = match response.json::<ApiErrorResponse>().await {
                        Ok(envelope) => envelope.error.message,
                        Err(_) => "no error detail in response".to_string(),
                    };
                    return Err(LlmError::Api { status, message });
                }
                Err(e) => {
                    if (e.is_connect() || e.is_timeout()) && self.retry.allows_retry(attempts) {
                        let delay = self.retry.delay_after(attempts);
                        tracing::warn!(
                            attempt = attempts,
                            error = %e,
                            delay = ?delay,
                            "Retrying LLM request after network error"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(LlmError::Transport(e));
                }
            }
        }
    }
}
