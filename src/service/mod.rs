//! Service layer: the language-model capability and its backends.
//!
//! [`PromptService`] is the trait every backend implements. The gateway
//! ships two: [`EchoPromptService`] for local runs and
//! [`RemotePromptService`] for forwarding to an upstream model server.

pub mod echo;
pub mod prompt_service;
pub mod remote;

use std::sync::Arc;

pub use echo::EchoPromptService;
pub use prompt_service::{PromptError, PromptService};
pub use remote::RemotePromptService;

use crate::config::{BackendConfig, GatewayConfig};

/// Builds the backend selected by the configuration.
#[must_use]
pub fn from_config(config: &GatewayConfig) -> Arc<dyn PromptService> {
    match &config.backend {
        BackendConfig::Echo => Arc::new(EchoPromptService),
        BackendConfig::Remote { url } => Arc::new(RemotePromptService::new(url.clone())),
    }
}
