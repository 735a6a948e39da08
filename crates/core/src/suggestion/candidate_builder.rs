//! Candidate builder - normalizes extracted items into typed candidates
//!
//! Every item becomes a candidate with canonical `YYYY-MM-DDTHH:MM`
//! start/end strings. Items are never dropped here: malformed fields are
//! defaulted (reference date, midnight, 60 minutes) and recorded through
//! `missing_date`/`missing_time` so downstream scoring can degrade them.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use eventsift_domain::constants::{
    CANONICAL_DATETIME_FORMAT, CANONICAL_DATE_FORMAT, CANONICAL_TIME_FORMAT, DEFAULT_DURATION_MIN,
    DEFAULT_START_TIME,
};
use eventsift_domain::{Candidate, EventSiftError, ExtractedItem, ParsedDocument, Result};

/// Builds candidates from a parsed document.
///
/// Holds the id counter explicitly - candidate id sequencing is owned by
/// the builder instance, not hidden module state.
pub struct CandidateBuilder {
    reference_date: NaiveDate,
    counter: usize,
}

impl CandidateBuilder {
    /// Create a builder for the given reference date (`YYYY-MM-DD`).
    ///
    /// # Errors
    /// Returns `InvalidInput` when the reference date itself is malformed -
    /// unlike item fields, the reference date is caller configuration and
    /// has no sane default to fall back to.
    pub fn new(reference_date: &str) -> Result<Self> {
        let parsed = NaiveDate::parse_from_str(reference_date, CANONICAL_DATE_FORMAT)
            .map_err(|_| {
                EventSiftError::InvalidInput(format!(
                    "reference date must be YYYY-MM-DD, got '{reference_date}'"
                ))
            })?;
        Ok(Self { reference_date: parsed, counter: 0 })
    }

    /// Normalize all items of a document. No item is dropped, even if
    /// malformed.
    pub fn build(&mut self, document: &ParsedDocument) -> Vec<Candidate> {
        document.items.iter().map(|item| self.build_one(item, &document.document_id)).collect()
    }

    fn build_one(&mut self, item: &ExtractedItem, document_id: &str) -> Candidate {
        let id = self.next_id(item);

        let observed_date = item
            .date_iso
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, CANONICAL_DATE_FORMAT).ok());
        let observed_time = item
            .start_time
            .as_deref()
            .and_then(|t| NaiveTime::parse_from_str(t, CANONICAL_TIME_FORMAT).ok());

        let missing_date = observed_date.is_none();
        let missing_time = observed_time.is_none();

        let date = observed_date.unwrap_or(self.reference_date);
        // Re-format through chrono so lenient inputs like "8:00" still end
        // up canonical
        let time_str = observed_time
            .map_or_else(
                || DEFAULT_START_TIME.to_string(),
                |t| t.format(CANONICAL_TIME_FORMAT).to_string(),
            );

        let start = format!("{}T{}", date.format(CANONICAL_DATE_FORMAT), time_str);
        let duration_min = item.duration_min.unwrap_or(DEFAULT_DURATION_MIN);
        let end = compute_end(&start, duration_min);

        let location =
            item.location.as_deref().map(str::trim).filter(|l| !l.is_empty()).map(str::to_string);

        Candidate {
            id,
            title: item.title.trim().to_string(),
            start,
            end,
            location,
            field_confidence: item.field_confidence.clamp(0.0, 1.0),
            missing_date,
            missing_time,
            has_explicit_end: item.duration_min.is_some(),
            source_text: item.source_text.clone(),
            source_document_id: document_id.to_string(),
            source_line_hints: item.line_hints.clone(),
        }
    }

    fn next_id(&mut self, item: &ExtractedItem) -> String {
        self.counter += 1;
        match item.id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
            Some(own) => own.to_string(),
            None => format!("s{}", self.counter),
        }
    }
}

/// UTC-safe end computation: parse the canonical start, add the duration,
/// format back. Falls back to `start` when parsing fails.
fn compute_end(start: &str, duration_min: i64) -> String {
    match NaiveDateTime::parse_from_str(start, CANONICAL_DATETIME_FORMAT) {
        Ok(dt) => (dt + Duration::minutes(duration_min))
            .format(CANONICAL_DATETIME_FORMAT)
            .to_string(),
        Err(_) => start.to_string(),
    }
}
