//! OpenAI-compatible provider implementation
//!
//! Talks to any `/chat/completions` endpoint (OpenRouter by default)

use super::Generator;
use crate::config::settings::UpstreamConfig;
use crate::models::openai::*;
use crate::utils::error::AttemptError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::debug;

/// OpenAI-compatible provider
#[derive(Clone)]
pub struct OpenAIProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for OpenAIProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl OpenAIProvider {
    /// Create a provider for the configured upstream
    pub fn new(upstream: &UpstreamConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("askgate/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: upstream.base_url.clone(),
            api_key: upstream.api_key.clone(),
        })
    }

    /// Build the request URL
    fn build_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Turn an HTTP response into generated text or an attempt error
    async fn handle_response(&self, response: Response) -> Result<String, AttemptError> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            let message = match serde_json::from_str::<OpenAIErrorResponse>(&error_text) {
                Ok(error_response) => error_response.error.message,
                Err(_) if error_text.is_empty() => {
                    status.canonical_reason().unwrap_or("unknown error").to_string()
                }
                Err(_) => error_text,
            };

            return Err(AttemptError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let completion: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| AttemptError::MalformedResponse(e.to_string()))?;

        debug!("Upstream request completed successfully");

        completion
            .first_content()
            .map(str::to_string)
            .ok_or_else(|| AttemptError::MalformedResponse("response contained no message content".to_string()))
    }
}

#[async_trait]
impl Generator for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, model: &str, prompt: &str) -> Result<String, AttemptError> {
        debug!("Sending chat completion request to {}", self.base_url);

        let request = OpenAIRequest::single_user_message(model, prompt);

        let response = self
            .client
            .post(self.build_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upstream(base_url: &str) -> UpstreamConfig {
        UpstreamConfig {
            api_key: "sk-or-test".to_string(),
            base_url: base_url.to_string(),
            model: "openai/gpt-oss-20b:free".to_string(),
        }
    }

    #[test]
    fn test_provider_name() {
        let provider = OpenAIProvider::new(&upstream("https://openrouter.ai/api/v1")).unwrap();
        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn test_build_url() {
        let provider = OpenAIProvider::new(&upstream("https://openrouter.ai/api/v1")).unwrap();
        assert_eq!(provider.build_url(), "https://openrouter.ai/api/v1/chat/completions");

        // Test with trailing slash
        let provider = OpenAIProvider::new(&upstream("https://openrouter.ai/api/v1/")).unwrap();
        assert_eq!(provider.build_url(), "https://openrouter.ai/api/v1/chat/completions");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let provider = OpenAIProvider::new(&upstream("https://openrouter.ai/api/v1")).unwrap();
        assert!(!format!("{:?}", provider).contains("sk-or-test"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Port 9 (discard) is not expected to accept connections locally
        let provider = OpenAIProvider::new(&upstream("http://127.0.0.1:9")).unwrap();

        let result = provider.generate("any-model", "hello").await;
        assert!(matches!(result, Err(AttemptError::Transport(_))));
    }
}
