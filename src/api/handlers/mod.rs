//! REST endpoint handlers.

pub mod prompt;
pub mod system;
