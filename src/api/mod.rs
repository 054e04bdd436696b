//! REST API layer: route handlers, DTOs, and the OpenAPI document.

pub mod dto;
pub mod handlers;
pub mod openapi;

use axum::Router;

use crate::app_state::AppState;

/// Builds the REST router: prompt routes at `prompt_path` plus system routes.
pub fn build_router(prompt_path: &str) -> Router<AppState> {
    Router::new()
        .merge(handlers::prompt::routes(prompt_path))
        .merge(handlers::system::routes())
}
