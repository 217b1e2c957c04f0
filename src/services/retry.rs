//! Resilient upstream call wrapper
//!
//! Runs one generation request with a per-attempt deadline, a bounded number of
//! attempts and a fixed pause between them

use crate::providers::Generator;
use crate::utils::error::{AskError, AttemptError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Default number of attempts per request
pub const MAX_RETRIES: u32 = 3;

/// Default per-attempt deadline in seconds
pub const TIMEOUT_SECONDS: u64 = 20;

/// Default pause between attempts in seconds
pub const RETRY_DELAY_SECONDS: u64 = 2;

/// Retry configuration
///
/// The delay is constant: no exponential growth, no jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Hard deadline for a single attempt
    pub attempt_timeout: Duration,
    /// Pause between a failed attempt and the next one
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_RETRIES,
            attempt_timeout: Duration::from_secs(TIMEOUT_SECONDS),
            retry_delay: Duration::from_secs(RETRY_DELAY_SECONDS),
        }
    }
}

impl RetryPolicy {
    /// Longest time a fully failing invocation can take
    pub fn worst_case_latency(&self) -> Duration {
        let attempts = self.max_attempts;
        self.attempt_timeout * attempts + self.retry_delay * attempts.saturating_sub(1)
    }
}

/// Result of one attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success(String),
    Failure(AttemptError),
}

/// Generator wrapper with timeout and retry functionality
///
/// Holds no per-request state; clones share the generator.
#[derive(Clone)]
pub struct ResilientClient {
    generator: Arc<dyn Generator>,
    model: String,
    policy: RetryPolicy,
}

impl std::fmt::Debug for ResilientClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResilientClient")
            .field("generator", &self.generator.name())
            .field("model", &self.model)
            .field("policy", &self.policy)
            .finish()
    }
}

impl ResilientClient {
    /// Create a wrapper around a generator
    pub fn new(generator: Arc<dyn Generator>, model: impl Into<String>, policy: RetryPolicy) -> Self {
        Self {
            generator,
            model: model.into(),
            policy,
        }
    }

    /// Model identifier sent upstream
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Active retry policy
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Ask the upstream model, retrying failed attempts
    ///
    /// Returns the first successful answer. After `max_attempts` failures the
    /// error of the last attempt is reported through [`AskError::Exhausted`].
    pub async fn ask(&self, prompt: &str) -> Result<String, AskError> {
        info!(model = %self.model, "LLM request received");

        let max_attempts = self.policy.max_attempts;
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            info!(attempt, max_attempts, "LLM attempt {}", attempt);

            match self.attempt(prompt).await? {
                AttemptOutcome::Success(text) => {
                    info!(attempt, "LLM response successful");
                    return Ok(text);
                }
                AttemptOutcome::Failure(err) => {
                    warn!(attempt, error = %err, "LLM attempt {} failed: {}", attempt, err);
                    last_error = Some(err);

                    if attempt < max_attempts {
                        tokio::time::sleep(self.policy.retry_delay).await;
                    }
                }
            }
        }

        match last_error {
            Some(last_error) => {
                error!(attempts = max_attempts, "LLM failed after maximum retries");
                Err(AskError::Exhausted {
                    attempts: max_attempts,
                    last_error,
                })
            }
            None => Err(AskError::Internal("retry policy allows no attempts".to_string())),
        }
    }

    /// Run a single attempt on its own task under the attempt deadline
    ///
    /// A timed-out task is aborted; the remote side is not notified. A panic
    /// in the generator is not retried and ends the invocation.
    async fn attempt(&self, prompt: &str) -> Result<AttemptOutcome, AskError> {
        let generator = Arc::clone(&self.generator);
        let model = self.model.clone();
        let prompt = prompt.to_string();

        let mut handle = tokio::spawn(async move { generator.generate(&model, &prompt).await });

        match tokio::time::timeout(self.policy.attempt_timeout, &mut handle).await {
            Ok(Ok(Ok(text))) => Ok(AttemptOutcome::Success(text)),
            Ok(Ok(Err(err))) => Ok(AttemptOutcome::Failure(err)),
            Ok(Err(join_error)) => Err(AskError::Internal(format!(
                "upstream call task failed: {}",
                join_error
            ))),
            Err(_) => {
                handle.abort();
                Ok(AttemptOutcome::Failure(AttemptError::Timeout(self.policy.attempt_timeout)))
            }
        }
    }
}
