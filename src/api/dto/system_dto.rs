//! System endpoint response DTOs.

use serde::Serialize;
use utoipa::ToSchema;

/// Response body for `GET /health`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"healthy"` when the server answers.
    pub status: String,
    /// RFC 3339 server time.
    pub timestamp: String,
    /// Crate version.
    pub version: String,
    /// Open WebSocket sessions.
    pub connections: usize,
}

/// Response body for `GET /info`.
#[derive(Debug, Serialize, ToSchema)]
pub struct InfoResponse {
    /// API title.
    pub title: String,
    /// API description.
    pub description: String,
    /// API version.
    pub version: String,
    /// Route serving HTTP prompts.
    pub prompt_path: String,
    /// Name of the model backend.
    pub backend: String,
    /// Example prompts; the first is the `GET` default.
    pub examples: Vec<String>,
}
