//! System endpoints: health check and service info.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{HealthResponse, InfoResponse};
use crate::app_state::AppState;

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, current timestamp, and the number of open WebSocket sessions.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        connections: state.connections.len(),
    })
}

/// `GET /info` — Service description and example prompts.
#[utoipa::path(
    get,
    path = "/info",
    tag = "System",
    summary = "Service info",
    description = "Returns the configured title, description, version, prompt route, backend, and example prompts.",
    responses(
        (status = 200, description = "Service info", body = InfoResponse),
    )
)]
pub async fn info_handler(State(state): State<AppState>) -> Json<InfoResponse> {
    Json(InfoResponse {
        title: state.info.title.clone(),
        description: state.info.description.clone(),
        version: state.info.version.clone(),
        prompt_path: state.prompt_path.to_string(),
        backend: state.prompt_service.name().to_string(),
        examples: state.info.examples.clone(),
    })
}

/// System routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/info", get(info_handler))
}
