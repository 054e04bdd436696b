//! Shared helpers for the end-to-end tests.

#![allow(dead_code, clippy::panic)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use prompt_gateway::app_state::AppState;
use prompt_gateway::config::GatewayConfig;
use prompt_gateway::domain::{ConnectionRegistry, PromptResult};
use prompt_gateway::server::{build_app, serve};
use prompt_gateway::service::{PromptError, PromptService};
use tokio::net::TcpListener;
use tokio::sync::{Mutex, oneshot};

/// Prompt that makes [`RecordingService`] fail.
pub const FAIL_PROMPT: &str = "explode";

/// Prompt that makes [`RecordingService`] never answer.
pub const HANG_PROMPT: &str = "hang";

/// Test double that records every prompt and answers `echo: <prompt>`.
#[derive(Debug, Default)]
pub struct RecordingService {
    prompts: Mutex<Vec<String>>,
}

impl RecordingService {
    /// Prompts received so far, in call order.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl PromptService for RecordingService {
    fn name(&self) -> &str {
        "recording"
    }

    async fn query(&self, prompt: &str) -> Result<PromptResult, PromptError> {
        self.prompts.lock().await.push(prompt.to_string());
        match prompt {
            FAIL_PROMPT => Err(PromptError::Backend("model crashed".to_string())),
            HANG_PROMPT => std::future::pending().await,
            _ => Ok(PromptResult::new(format!("echo: {prompt}"))),
        }
    }
}

/// A gateway running on an ephemeral local port.
#[derive(Debug)]
pub struct TestServer {
    /// Bound address.
    pub addr: SocketAddr,
    /// The server's live session registry.
    pub connections: Arc<ConnectionRegistry>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    /// Starts a gateway backed by `service` with the default configuration.
    pub async fn start(service: Arc<dyn PromptService>) -> Self {
        let config = GatewayConfig::default();
        let state = AppState::new(service, config.info, &config.prompt_path);
        let connections = Arc::clone(&state.connections);

        let Ok(listener) = TcpListener::bind("127.0.0.1:0").await else {
            panic!("failed to bind test listener");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("listener has no local address");
        };

        let (shutdown, shutdown_rx) = oneshot::channel::<()>();
        tokio::spawn(serve(listener, build_app(state), async move {
            let _ = shutdown_rx.await;
        }));

        Self {
            addr,
            connections,
            shutdown: Some(shutdown),
        }
    }

    /// `http://<addr><path>`
    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// `ws://<addr>/ws`
    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// Polls until the registry holds `expected` sessions; `false` on timeout.
    pub async fn wait_for_connections(&self, expected: usize) -> bool {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        while tokio::time::Instant::now() < deadline {
            if self.connections.len() == expected {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.connections.len() == expected
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}
