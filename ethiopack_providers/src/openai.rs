use async_trait::async_trait;
use ethiopack_core::{ChatMessage, LLMProvider, LLMResponse, Usage};
use reqwest::{Client, StatusCode};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::retry::{RetryPolicy, retry_with_backoff};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Non-success HTTP status from the chat completions API.
#[derive(Debug, Error)]
#[error("API returned HTTP {0}")]
pub struct StatusError(pub StatusCode);

impl StatusError {
    /// Client errors will fail the same way again, except timeouts and rate limits.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        !self.0.is_client_error()
            || matches!(
                self.0,
                StatusCode::REQUEST_TIMEOUT | StatusCode::TOO_MANY_REQUESTS
            )
    }
}

/// Transport failures and unparsable bodies are retried; only a
/// non-transient status stops the backoff early.
fn is_transient(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<StatusError>()
        .is_none_or(StatusError::is_transient)
}

/// OpenAI-compatible chat completions client.
#[derive(Clone)]
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    retry: RetryPolicy,
}

impl OpenAiProvider {
    #[must_use]
    pub fn new(api_key: String) -> Self {
        info!("Creating OpenAiProvider");
        Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            retry: RetryPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, mut base_url: String) -> Self {
        while base_url.ends_with('/') {
            base_url.pop();
        }
        self.base_url = base_url;
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Bound each request; falls back to the default client if the builder fails.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        self
    }

    /// Helper method to send a single request
    async fn try_send(&self, request: &serde_json::Value) -> anyhow::Result<LLMResponse> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatusError(status).into());
        }

        let body = response.json::<serde_json::Value>().await?;
        parse_response(&body)
    }
}

fn parse_response(response: &serde_json::Value) -> anyhow::Result<LLMResponse> {
    let content = response["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid response format: missing content"))?
        .to_string();

    let count = |u: &serde_json::Map<String, serde_json::Value>, key: &str| {
        u.get(key)
            .and_then(serde_json::Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0)
    };
    let usage = response["usage"].as_object().map(|u| Usage {
        prompt_tokens: count(u, "prompt_tokens"),
        completion_tokens: count(u, "completion_tokens"),
        total_tokens: count(u, "total_tokens"),
    });

    Ok(LLMResponse { content, usage })
}

#[async_trait]
impl LLMProvider for OpenAiProvider {
    async fn chat(&self, messages: &[ChatMessage], model: &str) -> anyhow::Result<LLMResponse> {
        let request = json!({
            "model": model,
            "messages": messages,
        });

        info!("Sending request to chat completions API: model={}", model);

        let response =
            retry_with_backoff(|| self.try_send(&request), &self.retry, is_transient).await?;

        info!("Received response from chat completions API");
        Ok(response)
    }

    fn get_default_model(&self) -> &str {
        &self.model
    }
}
