//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::config::ApiInfo;
use crate::domain::ConnectionRegistry;
use crate::service::PromptService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Model backend answering prompts.
    pub prompt_service: Arc<dyn PromptService>,
    /// Open WebSocket sessions.
    pub connections: Arc<ConnectionRegistry>,
    /// Descriptive metadata and example prompts.
    pub info: Arc<ApiInfo>,
    /// Route serving HTTP prompts.
    pub prompt_path: Arc<str>,
}

impl AppState {
    /// Creates state with an empty connection registry.
    #[must_use]
    pub fn new(prompt_service: Arc<dyn PromptService>, info: ApiInfo, prompt_path: &str) -> Self {
        Self {
            prompt_service,
            connections: Arc::new(ConnectionRegistry::new()),
            info: Arc::new(info),
            prompt_path: Arc::from(prompt_path),
        }
    }

    /// Prompt used by `GET` requests that omit `prompt`.
    #[must_use]
    pub fn default_prompt(&self) -> &str {
        self.info.default_prompt()
    }
}
