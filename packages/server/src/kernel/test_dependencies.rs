// TestDependencies - mock implementations for testing
//
// Provides a scripted completion service that can be injected into
// ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use super::{BaseAI, ServerDeps};

// =============================================================================
// Mock AI
// =============================================================================

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error(String),
}

pub struct MockAI {
    responses: Arc<Mutex<Vec<MockReply>>>,
    calls: Arc<Mutex<Vec<String>>>,
    delay: Option<Duration>,
}

impl MockAI {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    /// Add a text response to the queue
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.push(MockReply::Text(response.into()));
        self
    }

    /// Add a JSON response to the queue (will be serialized)
    pub fn with_json_response<T: serde::Serialize>(self, data: &T) -> Self {
        let json = serde_json::to_string(data).unwrap_or_default();
        self.push(MockReply::Text(json));
        self
    }

    /// Queue a failed completion (simulates transport/service errors)
    pub fn with_error(self, message: impl Into<String>) -> Self {
        self.push(MockReply::Error(message.into()));
        self
    }

    /// Sleep before answering (for deadline tests)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Get all prompts that were sent to the AI
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Get the last prompt sent to the AI
    pub fn last_prompt(&self) -> Option<String> {
        self.calls().last().cloned()
    }

    /// Check if a prompt containing the given text was sent
    pub fn was_called_with(&self, text: &str) -> bool {
        self.calls().iter().any(|p| p.contains(text))
    }

    /// Get the number of times the AI was called
    pub fn call_count(&self) -> usize {
        self.calls().len()
    }

    fn push(&self, reply: MockReply) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(reply);
    }

    fn next_reply(&self) -> Option<MockReply> {
        let mut responses = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if responses.is_empty() {
            None
        } else {
            Some(responses.remove(0))
        }
    }
}

impl Default for MockAI {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn complete(&self, prompt: &str) -> Result<String> {
        // Record the call
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.next_reply() {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::Error(message)) => Err(anyhow::anyhow!(message)),
            // Default mock response
            None => Ok("Mock AI response".to_string()),
        }
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Builder for ServerDeps wired with mocks.
pub struct TestDependencies {
    pub ai: Arc<MockAI>,
    pub completion_deadline: Duration,
    pub strict_status_vocabulary: bool,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            ai: Arc::new(MockAI::new()),
            completion_deadline: Duration::from_secs(5),
            strict_status_vocabulary: false,
        }
    }

    pub fn mock_ai(mut self, ai: MockAI) -> Self {
        self.ai = Arc::new(ai);
        self
    }

    pub fn completion_deadline(mut self, deadline: Duration) -> Self {
        self.completion_deadline = deadline;
        self
    }

    pub fn strict_status_vocabulary(mut self, strict: bool) -> Self {
        self.strict_status_vocabulary = strict;
        self
    }

    pub fn into_server_deps(self) -> ServerDeps {
        ServerDeps::new(self.ai, self.completion_deadline)
            .with_strict_status_vocabulary(self.strict_status_vocabulary)
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
