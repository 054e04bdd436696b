//! Local backend that answers every prompt with the prompt itself.

use async_trait::async_trait;

use super::{PromptError, PromptService};
use crate::domain::PromptResult;

/// Deterministic backend for local development and smoke tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoPromptService;

#[async_trait]
impl PromptService for EchoPromptService {
    fn name(&self) -> &str {
        "echo"
    }

    async fn query(&self, prompt: &str) -> Result<PromptResult, PromptError> {
        Ok(PromptResult::new(prompt))
    }
}
