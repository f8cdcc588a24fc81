// AI implementation using an OpenAI-compatible chat completion API
//
// This is the infrastructure implementation of BaseAI.
// Business logic (what to prompt for) lives in domain layers.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use openai_client::{truncate_to_char_boundary, ChatRequest, Message, OpenAIClient};

use super::BaseAI;
use crate::Config;

/// First backoff step; doubles per retry.
pub const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

/// Backoff ceiling between two attempts.
pub const RETRY_MAX_DELAY: Duration = Duration::from_secs(8);

/// OpenAI implementation of AI capabilities
#[derive(Clone, Debug)]
pub struct OpenAiCompletion {
    client: OpenAIClient,
    model: String,
    temperature: f32,
    max_tokens: u32,
    max_retries: u32,
    retry_base_delay: Duration,
}

impl OpenAiCompletion {
    pub fn new(client: OpenAIClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            temperature: 0.3,
            max_tokens: 500,
            max_retries: 0,
            retry_base_delay: RETRY_BASE_DELAY,
        }
    }

    /// Build the HTTP client and adapter from startup configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = OpenAIClient::new(&config.openai_api_key, &config.openai_base_url)
            .with_timeout(config.completion_timeout)
            .context("Failed to create OpenAI client")?;

        Ok(Self::new(client, &config.openai_model)
            .with_sampling(config.temperature, config.max_tokens)
            .with_retries(config.completion_max_retries))
    }

    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    fn backoff(&self, attempt: u32) -> Duration {
        self.retry_base_delay
            .saturating_mul(1u32 << attempt.min(16))
            .min(RETRY_MAX_DELAY)
    }

    async fn send(&self, messages: Vec<Message>) -> Result<String> {
        let prompt_length: usize = messages.iter().map(|m| m.content.len()).sum();
        let mut attempt = 0;

        loop {
            let mut request = ChatRequest::new(&self.model)
                .temperature(self.temperature)
                .token_limit(self.max_tokens);
            request.messages = messages.clone();

            tracing::info!(model = %self.model, prompt_length, attempt, "Calling OpenAI API");
            let start = std::time::Instant::now();

            match self.client.chat_completion(request).await {
                Ok(response) => {
                    tracing::info!(
                        response_length = response.content.len(),
                        duration_ms = start.elapsed().as_millis(),
                        model = %self.model,
                        "OpenAI API response received"
                    );
                    return Ok(response.content);
                }
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    let delay = self.backoff(attempt);
                    tracing::warn!(
                        error = %e,
                        attempt,
                        delay_ms = delay.as_millis(),
                        "Transient OpenAI failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    let preview = messages
                        .last()
                        .map(|m| truncate_to_char_boundary(&m.content, 200))
                        .unwrap_or_default();
                    tracing::error!(
                        error = %e,
                        model = %self.model,
                        attempts = attempt + 1,
                        prompt_preview = %preview,
                        "OpenAI API call failed"
                    );
                    return Err(anyhow::Error::new(e).context("Failed to call OpenAI API"));
                }
            }
        }
    }
}

#[async_trait]
impl BaseAI for OpenAiCompletion {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.send(vec![Message::user(prompt)]).await
    }

    async fn complete_with_system(&self, system_prompt: &str, prompt: &str) -> Result<String> {
        self.send(vec![Message::system(system_prompt), Message::user(prompt)])
            .await
    }
}
