//! WebSocket layer: upgrade handling, frame codec, and session loop.
//!
//! The endpoint at `/ws` carries one prompt per client text frame and one
//! result per server text frame.

pub mod handler;
pub mod messages;
pub mod session;
