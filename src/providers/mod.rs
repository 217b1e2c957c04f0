//! Provider module
//!
//! Defines the Generator trait and the upstream provider implementations

pub mod openai;

use crate::utils::error::AttemptError;
use async_trait::async_trait;

/// Text generation capability offered by an upstream LLM provider
///
/// One call is one attempt; retry and timeout policy live in
/// [`crate::services::ResilientClient`], not in implementations.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Generate a completion for a single user prompt
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, AttemptError>;
}

pub use openai::OpenAIProvider;
