//! WebSocket prompt session state machine.
//!
//! A session moves `Connecting → Open → Closed`:
//!
//! - `Connecting → Open` when the upgrade completes; the session is added
//!   to the [`ConnectionRegistry`].
//! - `Open → Open` for every text frame: decode the prompt, query the
//!   [`PromptService`], send the result back as one text frame.
//! - `Open → Closed` on client close, malformed input, service failure or
//!   transport error. The registry entry is owned by a
//!   [`ConnectionGuard`], so it is released even if the task is cancelled.
//!
//! Frames are handled strictly one at a time, in receive order.

use std::fmt;
use std::sync::Arc;

use axum::extract::ws::{CloseFrame, Message, Utf8Bytes, WebSocket, close_code};
use chrono::Utc;
use futures_util::{Sink, SinkExt, Stream, StreamExt};

use super::messages::{FrameError, decode_prompt, encode_result};
use crate::app_state::AppState;
use crate::domain::{ConnectionGuard, ConnectionId, ConnectionRegistry};
use crate::service::{PromptError, PromptService};

/// Lifecycle state of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created but not yet registered.
    Connecting,
    /// Registered and processing frames.
    Open,
    /// Deregistered; terminal.
    Closed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Why a session left the `Open` state.
#[derive(Debug)]
pub enum SessionEnd {
    /// The client sent a Close frame or the stream ended.
    ClientClosed,
    /// An inbound frame was not a valid prompt.
    Malformed(FrameError),
    /// The prompt service failed.
    ServiceFailed(PromptError),
    /// A result could not be serialized.
    Encode(serde_json::Error),
    /// Receiving or sending failed at the transport level.
    Transport(String),
}

impl SessionEnd {
    /// Returns `true` for every exit other than a client close.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        !matches!(self, Self::ClientClosed)
    }

    /// Close frame the server sends on its way out, if any.
    #[must_use]
    pub fn close_frame(&self) -> Option<CloseFrame> {
        let (code, reason) = match self {
            Self::ClientClosed | Self::Transport(_) => return None,
            Self::Malformed(_) => (close_code::UNSUPPORTED, "malformed prompt frame"),
            Self::ServiceFailed(_) | Self::Encode(_) => (close_code::ERROR, "prompt failed"),
        };
        Some(CloseFrame {
            code,
            reason: Utf8Bytes::from_static(reason),
        })
    }
}

impl fmt::Display for SessionEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientClosed => f.write_str("client closed"),
            Self::Malformed(err) => write!(f, "malformed frame: {err}"),
            Self::ServiceFailed(err) => write!(f, "prompt service failed: {err}"),
            Self::Encode(err) => write!(f, "result encoding failed: {err}"),
            Self::Transport(err) => write!(f, "transport error: {err}"),
        }
    }
}

/// One WebSocket connection's lifetime, from accept to termination.
#[derive(Debug)]
pub struct Session {
    registry: Arc<ConnectionRegistry>,
    guard: Option<ConnectionGuard>,
    state: SessionState,
    answered: u64,
}

impl Session {
    /// Creates a session in the `Connecting` state.
    #[must_use]
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self {
            registry,
            guard: None,
            state: SessionState::Connecting,
            answered: 0,
        }
    }

    /// Registers the session and moves it to `Open`.
    ///
    /// Calling this on an open or closed session returns the existing id
    /// (or `None` when closed) without registering again.
    pub fn open(&mut self) -> Option<ConnectionId> {
        match self.state {
            SessionState::Connecting => {
                let guard = self.registry.register();
                let id = guard.id();
                self.guard = Some(guard);
                self.state = SessionState::Open;
                Some(id)
            }
            SessionState::Open => self.id(),
            SessionState::Closed => None,
        }
    }

    /// Deregisters the session and moves it to `Closed`.
    pub fn close(&mut self) {
        self.guard = None;
        self.state = SessionState::Closed;
    }

    /// Registry id while the session is open.
    #[must_use]
    pub fn id(&self) -> Option<ConnectionId> {
        self.guard.as_ref().map(ConnectionGuard::id)
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Number of prompts answered so far.
    #[must_use]
    pub const fn answered(&self) -> u64 {
        self.answered
    }

    /// Processes frames until the session must end and returns why.
    ///
    /// Does not change the lifecycle state; the caller closes the session.
    pub async fn serve<Tx, Rx, E>(
        &mut self,
        tx: &mut Tx,
        rx: &mut Rx,
        service: &dyn PromptService,
    ) -> SessionEnd
    where
        Tx: Sink<Message> + Unpin,
        <Tx as Sink<Message>>::Error: fmt::Display,
        Rx: Stream<Item = Result<Message, E>> + Unpin,
        E: fmt::Display,
    {
        loop {
            let text = match rx.next().await {
                Some(Ok(Message::Text(text))) => text,
                Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
                Some(Ok(Message::Binary(_))) => {
                    return SessionEnd::Malformed(FrameError::NonTextFrame);
                }
                Some(Ok(Message::Close(_))) | None => return SessionEnd::ClientClosed,
                Some(Err(err)) => return SessionEnd::Transport(err.to_string()),
            };

            let prompt = match decode_prompt(text.as_str()) {
                Ok(prompt) => prompt,
                Err(err) => return SessionEnd::Malformed(err),
            };

            let result = match service.query(&prompt).await {
                Ok(result) => result,
                Err(err) => return SessionEnd::ServiceFailed(err),
            };

            let frame = match encode_result(&result) {
                Ok(frame) => frame,
                Err(err) => return SessionEnd::Encode(err),
            };

            if let Err(err) = tx.send(frame).await {
                return SessionEnd::Transport(err.to_string());
            }
            self.answered = self.answered.saturating_add(1);
        }
    }
}

/// Runs one accepted WebSocket until it terminates.
pub async fn run_session(socket: WebSocket, state: AppState) {
    let mut session = Session::new(Arc::clone(&state.connections));
    let Some(connection_id) = session.open() else {
        return;
    };
    let connected_at = state
        .connections
        .get(connection_id)
        .map(|info| info.connected_at);
    tracing::info!(
        %connection_id,
        connected = state.connections.len(),
        "websocket session opened"
    );

    let (mut ws_tx, mut ws_rx) = socket.split();
    let end = session
        .serve(&mut ws_tx, &mut ws_rx, state.prompt_service.as_ref())
        .await;

    if end.is_error() {
        tracing::error!(%connection_id, reason = %end, "websocket session failed");
    }
    if let Some(frame) = end.close_frame() {
        // Best effort: the peer may already be gone.
        let _ = ws_tx.send(Message::Close(Some(frame))).await;
    }

    session.close();
    let duration_ms = connected_at.map(|at| (Utc::now() - at).num_milliseconds());
    tracing::info!(
        %connection_id,
        state = %session.state(),
        answered = session.answered(),
        duration_ms,
        connected = state.connections.len(),
        "websocket session closed"
    );
}
