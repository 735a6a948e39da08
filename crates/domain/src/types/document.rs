//! Input types produced by the upstream document extractor
//!
//! These are wire types: field names follow the JSON contract of the
//! extraction collaborator (camelCase, `dateISO`). Missing optional fields
//! degrade confidence downstream but never fail deserialization.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CONTEXT_CONFIDENCE;

/// A parsed document handed to the engine by the extraction layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDocument {
    /// Identifier of the source document (file id, upload id, ...)
    pub document_id: String,

    /// Raw candidate items extracted from the document
    pub items: Vec<ExtractedItem>,

    /// Document-level context supplied by the extractor
    #[serde(default)]
    pub context: DocumentContext,
}

/// Document-level confidence and classification from the extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentContext {
    /// How confident the extractor is in the document as a whole, in [0,1]
    #[serde(default = "default_context_confidence")]
    pub confidence: f64,

    /// Classification tag (e.g. "travel", "invitation", "generic").
    /// Open set - the extractor may introduce new tags without a contract
    /// change here.
    #[serde(default = "default_context_kind")]
    pub kind: String,
}

impl Default for DocumentContext {
    fn default() -> Self {
        Self { confidence: DEFAULT_CONTEXT_CONFIDENCE, kind: "generic".to_string() }
    }
}

fn default_context_confidence() -> f64 {
    DEFAULT_CONTEXT_CONFIDENCE
}

fn default_context_kind() -> String {
    "generic".to_string()
}

/// One raw candidate event extracted from a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedItem {
    /// Extractor-assigned id; when absent the engine assigns `s1`, `s2`, ...
    #[serde(default)]
    pub id: Option<String>,

    /// Event title as written in the document
    #[serde(default)]
    pub title: String,

    /// Date in `YYYY-MM-DD`, when the extractor observed one
    #[serde(rename = "dateISO", default)]
    pub date_iso: Option<String>,

    /// Start time in `HH:MM`, when the extractor observed one
    #[serde(default)]
    pub start_time: Option<String>,

    /// Explicit duration in minutes, when observed
    #[serde(default)]
    pub duration_min: Option<i64>,

    /// Location text, when observed
    #[serde(default)]
    pub location: Option<String>,

    /// Per-field extraction confidence in [0,1]
    #[serde(default = "default_field_confidence")]
    pub field_confidence: f64,

    /// Snippet of the source text this item was extracted from
    #[serde(default)]
    pub source_text: String,

    /// Line numbers in the source document, for traceability
    #[serde(default)]
    pub line_hints: Vec<u32>,
}

fn default_field_confidence() -> f64 {
    crate::constants::DEFAULT_FIELD_CONFIDENCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_item_deserializes_with_defaults() {
        let item: ExtractedItem = serde_json::from_str(r#"{"title": "Kickoff"}"#).unwrap();
        assert_eq!(item.title, "Kickoff");
        assert!(item.date_iso.is_none());
        assert!(item.start_time.is_none());
        assert!((item.field_confidence - 0.5).abs() < f64::EPSILON);
        assert!(item.line_hints.is_empty());
    }

    #[test]
    fn test_date_iso_wire_name() {
        let item: ExtractedItem =
            serde_json::from_str(r#"{"title": "Kickoff", "dateISO": "2026-03-12"}"#).unwrap();
        assert_eq!(item.date_iso.as_deref(), Some("2026-03-12"));

        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("dateISO").is_some());
    }

    #[test]
    fn test_document_context_defaults() {
        let doc: ParsedDocument =
            serde_json::from_str(r#"{"documentId": "doc-1", "items": []}"#).unwrap();
        assert_eq!(doc.context.kind, "generic");
        assert!((doc.context.confidence - 0.5).abs() < f64::EPSILON);
    }
}
