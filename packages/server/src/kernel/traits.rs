// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// What to ask the model and how to read its answer live in domains/.
//
// Naming convention: Base* for trait names (e.g., BaseAI)

use anyhow::Result;
use async_trait::async_trait;

// =============================================================================
// AI Trait (Infrastructure - Generic LLM capabilities)
// =============================================================================

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// Complete a prompt with an LLM (returns raw text response)
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Complete a prompt under a system instruction (returns raw text response)
    async fn complete_with_system(&self, system_prompt: &str, prompt: &str) -> Result<String> {
        // Default implementation folds the instruction into the prompt
        let combined = format!("{}\n\n{}", system_prompt, prompt);
        self.complete(&combined).await
    }
}
