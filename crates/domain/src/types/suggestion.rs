//! Suggestion pipeline types
//!
//! Internal candidates, structure group definitions, and the published
//! engine output. All of these are immutable value objects: pipeline stages
//! produce fresh values, never mutate shared state in place.

use serde::{Deserialize, Serialize};

use crate::impl_domain_tag_conversions;

/// Engine configuration
///
/// `reference_date` fills in the date of items that were extracted without
/// one; `dev_log` turns on verbose per-stage tracing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Reference date in `YYYY-MM-DD`, used for items without a date
    pub reference_date: String,

    /// Emit verbose per-stage traces at debug level
    #[serde(default)]
    pub dev_log: bool,
}

impl EngineConfig {
    /// Create a config for the given reference date
    pub fn for_reference_date(reference_date: impl Into<String>) -> Self {
        Self { reference_date: reference_date.into(), dev_log: false }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { reference_date: "1970-01-01".to_string(), dev_log: false }
    }
}

/// Normalized candidate derived from an [`crate::ExtractedItem`]
///
/// `start`/`end` are canonical `YYYY-MM-DDTHH:MM` strings after the
/// candidate builder runs. `missing_date`/`missing_time` record whether the
/// *original* fields were usable - a synthesized default is never passed off
/// as an observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub title: String,
    pub start: String,
    pub end: String,
    pub location: Option<String>,
    pub field_confidence: f64,
    pub missing_date: bool,
    pub missing_time: bool,
    /// Whether the source carried an explicit duration (and therefore an
    /// observed, not defaulted, end time)
    pub has_explicit_end: bool,
    pub source_text: String,
    pub source_document_id: String,
    pub source_line_hints: Vec<u32>,
}

impl Candidate {
    /// Date component (`YYYY-MM-DD`) of the canonical start
    pub fn start_date(&self) -> &str {
        self.start.get(..10).unwrap_or(&self.start)
    }

    /// Clock component (`HH:MM`) of the canonical start
    pub fn start_time(&self) -> &str {
        self.start.get(11..16).unwrap_or("")
    }
}

/// Multi-event structure classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupType {
    Trip,
    Agenda,
    Series,
    None,
}

impl_domain_tag_conversions!(GroupType {
    Trip => "trip",
    Agenda => "agenda",
    Series => "series",
    None => "none",
});

/// A structure group emitted by the detector
///
/// Only member ids are carried; the grouper resolves them back to
/// candidates. A candidate id appears in at most one definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureGroupDef {
    pub group_id: String,
    pub group_type: GroupType,
    pub group_title: String,
    pub group_rationale: String,
    pub member_ids: Vec<String>,
    /// Added to the group's averaged member confidence
    pub confidence_boost: f64,
    /// Added on top when member starts are non-decreasing
    pub ordering_bonus: f64,
}

/// Human-readable explanation attached to every member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub title: String,
    pub bullets: Vec<String>,
}

/// Traceability back into the source document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRef {
    pub document_id: String,
    pub line_hints: Vec<u32>,
}

/// One review-ready suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub title: String,
    pub start: String,
    pub end: String,
    pub location: Option<String>,
    pub suggestion_confidence: f64,
    pub explanation: Explanation,
    pub source: SourceRef,
}

/// A suggestion group: structured (trip/agenda/series) or a singleton
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub group_id: String,
    pub group_type: GroupType,
    pub group_title: String,
    pub group_rationale: String,
    pub group_confidence: f64,
    pub members: Vec<Member>,
}

/// Metadata about how the output was produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineMeta {
    pub ai_fallback_used: bool,
    pub ai_fallback_reason: Option<String>,
}

/// The only value that crosses the engine boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineOutput {
    pub groups: Vec<Group>,
    pub meta: EngineMeta,
}

impl EngineOutput {
    /// Canonical JSON form, shared by the schema validator and tests
    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_group_type_tags() {
        assert_eq!(GroupType::Trip.to_string(), "trip");
        assert_eq!(GroupType::None.to_string(), "none");
        assert_eq!(GroupType::from_str("SERIES").unwrap(), GroupType::Series);
        assert!(GroupType::from_str("cluster").is_err());
    }

    #[test]
    fn test_group_type_serializes_lowercase() {
        let json = serde_json::to_value(GroupType::Agenda).unwrap();
        assert_eq!(json, "agenda");
    }

    #[test]
    fn test_candidate_start_accessors() {
        let candidate = Candidate {
            id: "s1".to_string(),
            title: "Kickoff".to_string(),
            start: "2026-03-12T08:00".to_string(),
            end: "2026-03-12T09:00".to_string(),
            location: None,
            field_confidence: 0.8,
            missing_date: false,
            missing_time: false,
            has_explicit_end: false,
            source_text: String::new(),
            source_document_id: "doc-1".to_string(),
            source_line_hints: vec![],
        };
        assert_eq!(candidate.start_date(), "2026-03-12");
        assert_eq!(candidate.start_time(), "08:00");
    }

    #[test]
    fn test_engine_output_wire_names() {
        let output = EngineOutput {
            groups: vec![],
            meta: EngineMeta { ai_fallback_used: false, ai_fallback_reason: None },
        };
        let json = output.to_value().unwrap();
        assert!(json["meta"].get("aiFallbackUsed").is_some());
        assert!(json["meta"]["aiFallbackReason"].is_null());
    }
}
