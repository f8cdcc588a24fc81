//! Server dependencies for request handlers (using traits for testability)
//!
//! Central container handed to the HTTP layer. External services sit behind
//! trait objects so tests can swap in `MockAI`.

use std::sync::Arc;
use std::time::Duration;

use crate::kernel::BaseAI;

/// Dependencies accessible to domain actions
#[derive(Clone)]
pub struct ServerDeps {
    /// Completion service used to judge products
    pub ai: Arc<dyn BaseAI>,
    /// Hard ceiling on one completion step, retries included
    pub completion_deadline: Duration,
    /// Downgrade statuses outside the known vocabulary to "Uncertain"
    pub strict_status_vocabulary: bool,
}

impl ServerDeps {
    pub fn new(ai: Arc<dyn BaseAI>, completion_deadline: Duration) -> Self {
        Self {
            ai,
            completion_deadline,
            strict_status_vocabulary: false,
        }
    }

    pub fn with_strict_status_vocabulary(mut self, strict: bool) -> Self {
        self.strict_status_vocabulary = strict;
        self
    }
}
