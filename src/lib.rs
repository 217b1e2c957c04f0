//! askgate Library
//!
//! Forwards user prompts to an upstream LLM provider behind a bounded
//! timeout-and-retry policy

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod providers;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::Settings;
pub use handlers::{build_router, create_router, AppState};
pub use models::{PromptRequest, PromptResponse};
pub use providers::{Generator, OpenAIProvider};
pub use services::{ResilientClient, RetryPolicy};
pub use utils::error::{AppError, AppResult, AskError, AttemptError};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
