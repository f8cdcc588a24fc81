//! Error types for OpenAI client.

use thiserror::Error;

/// Result type for OpenAI client operations.
pub type Result<T> = std::result::Result<T, OpenAIError>;

/// OpenAI client errors.
#[derive(Debug, Error)]
pub enum OpenAIError {
    /// Client could not be configured (HTTP client build failure)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection refused, DNS, TLS)
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Credentials rejected (401/403)
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Quota or rate limit exhausted (429)
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Any other non-2xx response
    #[error("API error: {0}")]
    Api(String),

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl OpenAIError {
    /// Whether a retry has a reasonable chance of succeeding.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            OpenAIError::Network(_) | OpenAIError::Timeout(_) | OpenAIError::RateLimited(_)
        )
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            OpenAIError::Timeout(err.to_string())
        } else if err.is_decode() {
            OpenAIError::Parse(err.to_string())
        } else {
            OpenAIError::Network(err.to_string())
        }
    }

    pub(crate) fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        match status.as_u16() {
            401 | 403 => OpenAIError::Auth(format!("{}: {}", status, body)),
            429 => OpenAIError::RateLimited(format!("{}: {}", status, body)),
            _ => OpenAIError::Api(format!("{}: {}", status, body)),
        }
    }
}
