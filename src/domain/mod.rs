//! Domain layer: prompt value types and the open-session registry.
//!
//! This module holds the data the gateway passes around (prompts and their
//! results) and the one piece of shared state it owns: the registry of
//! WebSocket sessions that are currently open.

pub mod connection_id;
pub mod connection_registry;
pub mod prompt;

pub use connection_id::ConnectionId;
pub use connection_registry::{ConnectionGuard, ConnectionInfo, ConnectionRegistry};
pub use prompt::{PromptResult, SourceDocument};
