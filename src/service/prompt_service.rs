//! The language-model capability consumed by the gateway.

use async_trait::async_trait;

use crate::domain::PromptResult;

/// Failure reported by a [`PromptService`].
///
/// The gateway never retries or transforms these: HTTP callers get a 500,
/// WebSocket sessions are terminated.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// The model backend itself reported a failure.
    #[error("model backend failed: {0}")]
    Backend(String),

    /// An upstream model server answered with a non-success status.
    #[error("upstream returned status {status}: {body}")]
    Upstream {
        /// HTTP status code returned by the upstream.
        status: u16,
        /// Response body, lossily decoded as UTF-8.
        body: String,
    },

    /// The request to the upstream model server could not be completed.
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream answer was not a valid prompt result.
    #[error("invalid upstream response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Turns a prompt into an answer.
///
/// This is the only seam between the gateway and model inference. Handlers
/// hold it as `Arc<dyn PromptService>` so backends can be swapped without
/// touching the HTTP or WebSocket code.
#[async_trait]
pub trait PromptService: Send + Sync + std::fmt::Debug {
    /// Short backend name used in logs and the `/info` endpoint.
    fn name(&self) -> &str;

    /// Answers one prompt.
    ///
    /// Implementations may take a long time; the gateway applies no timeout.
    ///
    /// # Errors
    ///
    /// Returns a [`PromptError`] when the backend cannot produce an answer.
    async fn query(&self, prompt: &str) -> Result<PromptResult, PromptError>;
}
