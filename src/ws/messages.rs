//! WebSocket frame payloads.
//!
//! Clients send `{"prompt": "...", ...}` text frames (extra fields are
//! ignored); the server answers each with one serialized
//! [`PromptResult`].

use axum::extract::ws::Message;
use serde_json::Value;

use crate::domain::PromptResult;

/// Why an inbound frame could not be turned into a prompt.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The text is not JSON.
    #[error("frame is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The JSON value is not an object.
    #[error("frame is not a JSON object")]
    NotAnObject,

    /// The object has no string `prompt` field.
    #[error("frame has no string \"prompt\" field")]
    MissingPrompt,

    /// A binary frame was received.
    #[error("binary frames are not supported")]
    NonTextFrame,
}

/// Extracts the prompt from a client text frame.
///
/// # Errors
///
/// Returns a [`FrameError`] if the text is not a JSON object carrying a
/// string `prompt` field.
pub fn decode_prompt(text: &str) -> Result<String, FrameError> {
    let value: Value = serde_json::from_str(text).map_err(FrameError::InvalidJson)?;
    let Value::Object(mut fields) = value else {
        return Err(FrameError::NotAnObject);
    };
    match fields.remove("prompt") {
        Some(Value::String(prompt)) => Ok(prompt),
        _ => Err(FrameError::MissingPrompt),
    }
}

/// Serializes a result into the text frame sent back to the client.
///
/// # Errors
///
/// Returns the serializer error; this does not happen for well-formed
/// results.
pub fn encode_result(result: &PromptResult) -> Result<Message, serde_json::Error> {
    serde_json::to_string(result).map(Message::text)
}
