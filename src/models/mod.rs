//! Data models module
//!
//! Defines the ask endpoint payloads and the upstream chat completion structures

pub mod ask;
pub mod openai;

pub use ask::{ErrorDetail, PromptRequest, PromptResponse, ServiceStatus};
