//! # prompt-gateway
//!
//! HTTP and WebSocket gateway in front of a language model.
//!
//! The gateway forwards prompts to a [`service::PromptService`] and returns
//! its answers as JSON. Model inference is delegated entirely to the
//! service; the gateway owns only routing and the registry of open
//! WebSocket sessions.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)      GET/POST /prompt, /health, /info
//!     ├── WS Session (ws/)          /ws, one prompt per frame
//!     │
//!     ├── ConnectionRegistry (domain/)
//!     │
//!     └── PromptService (service/)  echo | remote upstream
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod server;
pub mod service;
pub mod ws;
