//! Backend that forwards prompts to an upstream model server.
//!
//! The upstream must accept `POST {"prompt": "..."}` and answer with a
//! prompt result body (`{"result": ..., "source_documents": ...}`), which is
//! exactly what this gateway's own `POST /prompt` route speaks. Gateways can
//! therefore be chained in front of a model server.

use async_trait::async_trait;
use serde::Serialize;

use super::{PromptError, PromptService};
use crate::domain::PromptResult;

#[derive(Serialize)]
struct UpstreamRequest<'a> {
    prompt: &'a str,
}

/// Forwards every prompt to `endpoint` over HTTP.
#[derive(Debug, Clone)]
pub struct RemotePromptService {
    client: reqwest::Client,
    endpoint: String,
}

impl RemotePromptService {
    /// Creates a backend posting to `endpoint`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl PromptService for RemotePromptService {
    fn name(&self) -> &str {
        "remote"
    }

    async fn query(&self, prompt: &str) -> Result<PromptResult, PromptError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&UpstreamRequest { prompt })
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            tracing::warn!(
                endpoint = %self.endpoint,
                status = status.as_u16(),
                "upstream rejected prompt"
            );
            return Err(PromptError::Upstream {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}
