//! Ask endpoint data models
//!
//! Defines the inbound prompt and outbound answer payloads

use serde::{Deserialize, Serialize};

/// Prompt submitted by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRequest {
    /// User prompt sent to the LLM (at least one character)
    pub prompt: String,
}

impl PromptRequest {
    /// Create a new prompt request
    pub fn new(prompt: impl Into<String>) -> Self {
        Self { prompt: prompt.into() }
    }

    /// Check the request invariants before it reaches the upstream wrapper
    ///
    /// Length is counted in characters; whitespace is not trimmed.
    pub fn validate(&self) -> Result<(), String> {
        if self.prompt.chars().count() < 1 {
            return Err("prompt: String should have at least 1 character".to_string());
        }

        Ok(())
    }
}

/// Answer produced by the LLM
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptResponse {
    /// LLM generated response
    pub response: String,
}

impl PromptResponse {
    pub fn new(response: impl Into<String>) -> Self {
        Self { response: response.into() }
    }
}

/// Fixed payload served on the root endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub status: String,
    pub message: String,
}

impl ServiceStatus {
    /// The liveness payload served on `GET /`
    pub fn online() -> Self {
        Self {
            status: "online".to_string(),
            message: "AI Agent API is ready".to_string(),
        }
    }
}

/// Error body returned for every non-2xx response produced by this service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}
