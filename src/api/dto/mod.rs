//! Data Transfer Objects for REST request/response serialization.
//!
//! Prompt answers are returned as [`crate::domain::PromptResult`] directly.

pub mod prompt_dto;
pub mod system_dto;

pub use prompt_dto::*;
pub use system_dto::*;
