//! Application configuration settings
//!
//! Defines all configuration structures and the environment loading logic

use crate::services::retry::{RetryPolicy, MAX_RETRIES, RETRY_DELAY_SECONDS, TIMEOUT_SECONDS};
use anyhow::{Context, Result};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default upstream endpoint (OpenRouter's OpenAI-compatible API)
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default upstream model identifier
pub const DEFAULT_MODEL: &str = "openai/gpt-oss-20b:free";

/// Environment variable holding the upstream credential
pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// Upstream provider configuration
    pub upstream: UpstreamConfig,
    /// Retry policy configuration
    pub retry: RetryConfig,
    /// Request configuration
    pub request: RequestConfig,
    /// Security configuration
    pub security: SecurityConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// Upstream LLM provider configuration
#[derive(Clone)]
pub struct UpstreamConfig {
    /// Bearer credential, only ever sourced from the environment
    pub api_key: String,
    /// API base URL
    pub base_url: String,
    /// Model identifier sent with every request
    pub model: String,
}

// Keeps the credential out of logs.
impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

/// Retry configuration for upstream calls
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total number of attempts
    pub max_retries: u32,
    /// Per-attempt timeout in seconds
    pub timeout_seconds: u64,
    /// Fixed delay between attempts in seconds
    pub retry_delay_seconds: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: MAX_RETRIES,
            timeout_seconds: TIMEOUT_SECONDS,
            retry_delay_seconds: RETRY_DELAY_SECONDS,
        }
    }
}

/// Request configuration
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// Maximum request size in bytes
    pub max_request_size: usize,
}

/// Security configuration
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Allowed origins for CORS
    pub allowed_origins: Vec<String>,
    /// Whether CORS is enabled
    pub cors_enabled: bool,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Settings {
    /// Create a new configuration instance from the process environment
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup
    ///
    /// `Settings::new` passes the process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let settings = Self {
            server: ServerConfig {
                host: get("SERVER_HOST", "127.0.0.1"),
                port: parse_value(&get("SERVER_PORT", "8000"), "SERVER_PORT")?,
            },
            upstream: UpstreamConfig {
                api_key: lookup(API_KEY_VAR)
                    .with_context(|| format!("{} environment variable not set", API_KEY_VAR))?,
                base_url: get("OPENROUTER_BASE_URL", DEFAULT_BASE_URL),
                model: get("LLM_MODEL", DEFAULT_MODEL),
            },
            retry: RetryConfig {
                max_retries: parse_value(&get("LLM_MAX_RETRIES", &MAX_RETRIES.to_string()), "LLM_MAX_RETRIES")?,
                timeout_seconds: parse_value(
                    &get("LLM_TIMEOUT_SECONDS", &TIMEOUT_SECONDS.to_string()),
                    "LLM_TIMEOUT_SECONDS",
                )?,
                retry_delay_seconds: parse_value(
                    &get("LLM_RETRY_DELAY_SECONDS", &RETRY_DELAY_SECONDS.to_string()),
                    "LLM_RETRY_DELAY_SECONDS",
                )?,
            },
            request: RequestConfig {
                max_request_size: parse_value(&get("MAX_REQUEST_SIZE", "1048576"), "MAX_REQUEST_SIZE")?,
            },
            security: SecurityConfig {
                allowed_origins: get("ALLOWED_ORIGINS", "*")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                cors_enabled: parse_value(&get("CORS_ENABLED", "true"), "CORS_ENABLED")?,
            },
            logging: LoggingConfig {
                level: get("RUST_LOG", "info"),
                format: get("LOG_FORMAT", "text"),
            },
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        if self.upstream.api_key.trim().is_empty() {
            anyhow::bail!("{} cannot be empty", API_KEY_VAR);
        }

        if self.upstream.api_key.contains(char::is_whitespace) {
            anyhow::bail!("{} cannot contain whitespace characters", API_KEY_VAR);
        }

        if !self.upstream.base_url.starts_with("http") {
            anyhow::bail!("Invalid upstream base URL format, should start with 'http'");
        }

        if self.upstream.model.trim().is_empty() {
            anyhow::bail!("LLM_MODEL cannot be empty");
        }

        if self.retry.max_retries == 0 {
            anyhow::bail!("LLM_MAX_RETRIES must be at least 1");
        }

        if self.retry.timeout_seconds == 0 {
            anyhow::bail!("LLM_TIMEOUT_SECONDS cannot be 0");
        }

        if self.request.max_request_size == 0 {
            anyhow::bail!("Maximum request size cannot be 0");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!("Invalid log level: {}", self.logging.level);
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }

    /// Build the retry policy used by the upstream wrapper
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry.max_retries,
            attempt_timeout: Duration::from_secs(self.retry.timeout_seconds),
            retry_delay: Duration::from_secs(self.retry.retry_delay_seconds),
        }
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_value<T>(raw: &str, key: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("Invalid value for {}: {}", key, raw))
}
