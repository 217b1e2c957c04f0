//! Error handling module
//!
//! Defines the upstream attempt errors, the retry wrapper's terminal errors and
//! the HTTP-facing application error

use crate::models::ErrorDetail;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::time::Duration;
use thiserror::Error;

/// Message returned to callers for any failure outside the modeled taxonomy
pub const GENERIC_INTERNAL_ERROR: &str = "An unexpected internal server error occurred.";

/// Failure of a single outbound call attempt
///
/// Recovered by the retry wrapper; never surfaced to callers on its own.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttemptError {
    /// The attempt did not finish within the per-attempt deadline
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection, TLS or body transfer failure
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider answered with a non-success status
    #[error("upstream API error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// The provider answered 2xx but the payload carried no usable text
    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for AttemptError {
    fn from(err: reqwest::Error) -> Self {
        AttemptError::Transport(err.to_string())
    }
}

/// Terminal failure of the retry wrapper
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AskError {
    /// Every configured attempt failed
    #[error("LLM failed after {attempts} retries: {last_error}")]
    Exhausted {
        attempts: u32,
        last_error: AttemptError,
    },

    /// The call could not be carried out at all (task panic, empty policy)
    #[error("LLM call aborted: {0}")]
    Internal(String),
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Request validation failed
    #[error("{0}")]
    Validation(String),

    /// The upstream provider could not produce an answer
    #[error("The AI service is currently unavailable. Error: {0}")]
    UpstreamUnavailable(String),

    /// Resource not found
    #[error("Not Found")]
    NotFound,

    /// Internal server error, detail is logged but never returned
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text placed in the `detail` field of the response body
    pub fn public_detail(&self) -> String {
        match self {
            AppError::Internal(_) => GENERIC_INTERNAL_ERROR.to_string(),
            other => other.to_string(),
        }
    }

    /// Convert to the response body
    pub fn to_error_detail(&self) -> ErrorDetail {
        ErrorDetail {
            detail: self.public_detail(),
        }
    }
}

impl From<AskError> for AppError {
    fn from(err: AskError) -> Self {
        match err {
            AskError::Exhausted { .. } => AppError::UpstreamUnavailable(err.to_string()),
            AskError::Internal(_) => AppError::Internal(err.to_string()),
        }
    }
}

/// Implement IntoResponse trait to allow errors to be returned directly as HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::Internal(_) => {
                tracing::error!("Unexpected error: {} - Status code: {}", self, status);
            }
            AppError::UpstreamUnavailable(_) => {
                tracing::error!("Error in ask: {} - Status code: {}", self, status);
            }
            _ => {
                tracing::warn!("Client error: {} - Status code: {}", self, status);
            }
        }

        (status, Json(self.to_error_detail())).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;
