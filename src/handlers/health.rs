//! Health check handlers
//!
//! Provides the fixed root status payload and a detailed liveness report

use crate::handlers::AppState;
use crate::models::ServiceStatus;
use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Liveness report
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service name
    pub service: String,
    /// Version information
    pub version: String,
    /// Timestamp
    pub timestamp: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
}

/// Root status
///
/// GET /
pub async fn root() -> Json<ServiceStatus> {
    Json(ServiceStatus::online())
}

/// Liveness check
///
/// GET /health/live
/// Confirms the process is serving requests; does not contact the upstream
pub async fn liveness_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Executing liveness check");

    Json(HealthResponse {
        status: "alive".to_string(),
        service: crate::NAME.to_string(),
        version: crate::VERSION.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}
