//! Prompt endpoint handlers.
//!
//! Both verbs call the prompt service exactly once and return its answer
//! unchanged. Service failures are not retried; they surface as a 500.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{PromptQuery, PromptRequest};
use crate::app_state::AppState;
use crate::domain::PromptResult;
use crate::error::{ErrorResponse, GatewayError};

/// `GET /prompt?prompt=...` — Prompt the model.
///
/// # Errors
///
/// Returns [`GatewayError::Prompt`] if the prompt service fails.
#[utoipa::path(
    get,
    path = "/prompt",
    tag = "Prompt",
    summary = "Prompt the LLM",
    description = "Sends the `prompt` query parameter to the model. Without it, the first configured example prompt is used.",
    params(PromptQuery),
    responses(
        (status = 200, description = "Model answer", body = PromptResult),
        (status = 500, description = "Model backend failed", body = ErrorResponse),
    )
)]
pub async fn get_prompt(
    State(state): State<AppState>,
    Query(query): Query<PromptQuery>,
) -> Result<Json<PromptResult>, GatewayError> {
    match query.prompt {
        Some(prompt) => answer(&state, &prompt).await,
        None => answer(&state, state.default_prompt()).await,
    }
}

/// `POST /prompt` — Prompt the model with a JSON body.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] if the body is not a prompt
/// request, or [`GatewayError::Prompt`] if the prompt service fails.
#[utoipa::path(
    post,
    path = "/prompt",
    tag = "Prompt",
    summary = "Prompt the LLM",
    description = "Sends the body's `prompt` field to the model.",
    request_body = PromptRequest,
    responses(
        (status = 200, description = "Model answer", body = PromptResult),
        (status = 400, description = "Body is not a prompt request", body = ErrorResponse),
        (status = 500, description = "Model backend failed", body = ErrorResponse),
    )
)]
pub async fn post_prompt(
    State(state): State<AppState>,
    payload: Result<Json<PromptRequest>, JsonRejection>,
) -> Result<Json<PromptResult>, GatewayError> {
    let Json(req) =
        payload.map_err(|rejection| GatewayError::InvalidRequest(rejection.body_text()))?;
    answer(&state, &req.prompt).await
}

async fn answer(state: &AppState, prompt: &str) -> Result<Json<PromptResult>, GatewayError> {
    tracing::debug!(
        backend = state.prompt_service.name(),
        prompt_len = prompt.len(),
        "querying model"
    );
    let result = state.prompt_service.query(prompt).await?;
    Ok(Json(result))
}

/// Prompt routes mounted at `path`.
pub fn routes(path: &str) -> Router<AppState> {
    Router::new().route(path, get(get_prompt).post(post_prompt))
}
