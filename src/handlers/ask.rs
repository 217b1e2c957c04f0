//! Ask handler
//!
//! Validates the prompt, runs it through the resilient upstream wrapper and
//! maps the outcome onto HTTP responses

use crate::handlers::AppState;
use crate::models::{PromptRequest, PromptResponse};
use crate::utils::error::{AppError, AppResult};
use crate::utils::logging::prompt_preview;
use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::{info, warn};

/// Handle prompt requests
///
/// POST /ask
pub async fn handle_ask(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PromptRequest>,
) -> AppResult<Json<PromptResponse>> {
    if let Err(error_msg) = request.validate() {
        warn!("Request validation failed: {}", error_msg);
        return Err(AppError::Validation(error_msg));
    }

    info!("Received request: {}", prompt_preview(&request.prompt));

    let answer = state.llm.ask(&request.prompt).await?;

    Ok(Json(PromptResponse::new(answer)))
}
