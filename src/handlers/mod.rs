//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod ask;
pub mod health;

use crate::config::settings::{SecurityConfig, Settings};
use crate::middleware::logging::request_logging_middleware;
use crate::providers::OpenAIProvider;
use crate::services::ResilientClient;
use crate::utils::error::AppError;
use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::any::Any;
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any as AnyCors, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{error, info};

/// Application state
#[derive(Debug)]
pub struct AppState {
    pub settings: Settings,
    pub llm: ResilientClient,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(settings: Settings, llm: ResilientClient) -> Self {
        Self {
            settings,
            llm,
            started_at: Instant::now(),
        }
    }
}

/// Create application router backed by the configured upstream provider
pub fn create_router(settings: Settings) -> Result<Router> {
    let provider = OpenAIProvider::new(&settings.upstream)?;

    let llm = ResilientClient::new(
        Arc::new(provider),
        settings.upstream.model.clone(),
        settings.retry_policy(),
    );

    info!(
        "Upstream configured: {} (model {}, {} attempts, {:?} timeout, {:?} delay)",
        settings.upstream.base_url,
        llm.model(),
        llm.policy().max_attempts,
        llm.policy().attempt_timeout,
        llm.policy().retry_delay,
    );

    Ok(build_router(AppState::new(settings, llm)))
}

/// Assemble routes and middleware around an existing state
pub fn build_router(state: AppState) -> Router {
    let max_request_size = state.settings.request.max_request_size;
    let cors = state
        .settings
        .security
        .cors_enabled
        .then(|| cors_layer(&state.settings.security));

    let middleware_stack = ServiceBuilder::new()
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_request_size));

    let router = Router::new()
        .route("/", get(health::root))
        .route("/health/live", get(health::liveness_check))
        .route("/ask", post(ask::handle_ask))
        .fallback(not_found)
        .with_state(Arc::new(state))
        .layer(middleware_stack);

    match cors {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins = if security.allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            security
                .allowed_origins
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AnyCors)
        .allow_headers(AnyCors)
}

async fn not_found() -> AppError {
    AppError::NotFound
}

/// Render a handler panic as the generic 500 body
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    error!("Handler panicked: {}", detail);
    AppError::Internal(detail).into_response()
}
