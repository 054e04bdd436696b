//! Prompt and prompt result value types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One source document reference attached to an answer.
///
/// Keys are backend-defined (typically `"source"`, `"page"`, ...).
pub type SourceDocument = BTreeMap<String, String>;

/// Answer produced by a [`crate::service::PromptService`] for one prompt.
///
/// Serialized as `{"result": ..., "source_documents": [...] | null}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PromptResult {
    /// Answer text.
    pub result: String,
    /// Documents the answer was grounded on, when the backend reports them.
    #[serde(default)]
    pub source_documents: Option<Vec<BTreeMap<String, String>>>,
}

impl PromptResult {
    /// Creates a result without source documents.
    #[must_use]
    pub fn new(result: impl Into<String>) -> Self {
        Self {
            result: result.into(),
            source_documents: None,
        }
    }

    /// Attaches source documents.
    #[must_use]
    pub fn with_sources(mut self, sources: Vec<SourceDocument>) -> Self {
        self.source_documents = Some(sources);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_sources_serialize_as_null() {
        let json = serde_json::to_value(PromptResult::new("hi")).ok();
        assert_eq!(
            json,
            Some(serde_json::json!({ "result": "hi", "source_documents": null }))
        );
    }

    #[test]
    fn sources_keep_order() {
        let first = SourceDocument::from([("source".to_string(), "a.pdf".to_string())]);
        let second = SourceDocument::from([("source".to_string(), "b.pdf".to_string())]);
        let result = PromptResult::new("answer").with_sources(vec![first, second]);

        let json = serde_json::to_value(&result).unwrap_or_default();
        assert_eq!(json["source_documents"][0]["source"], "a.pdf");
        assert_eq!(json["source_documents"][1]["source"], "b.pdf");
    }

    #[test]
    fn missing_sources_field_deserializes_to_none() {
        let parsed: Option<PromptResult> = serde_json::from_str(r#"{"result":"x"}"#).ok();
        assert_eq!(parsed, Some(PromptResult::new("x")));
    }
}
