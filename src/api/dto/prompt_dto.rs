//! Prompt request DTOs.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Request body for `POST /prompt`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(example = json!({ "prompt": "What is the capital of the Netherlands?" }))]
pub struct PromptRequest {
    /// Prompt to send to the model.
    pub prompt: String,
}

/// Query string for `GET /prompt`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PromptQuery {
    /// Prompt to send to the model. Defaults to the first example prompt.
    #[serde(default)]
    pub prompt: Option<String>,
}
