//! Confidence scoring for suggestion candidates
//!
//! Pure weighted formula: a completeness-blended base score minus penalties
//! for synthesized fields and placeholder titles, plus bonuses for strong
//! structure matches and observed location/end. Called twice per candidate:
//! once pre-grouping (structure unknown) for deduplication tie-breaks, and
//! once post-grouping with the real structure verdict.

use eventsift_domain::constants::{
    BASE_COMPLETENESS_WEIGHT, BASE_CONTEXT_WEIGHT, BASE_FIELD_WEIGHT, COMPLETENESS_DATE_WEIGHT,
    COMPLETENESS_END_WEIGHT, COMPLETENESS_LOCATION_WEIGHT, COMPLETENESS_TITLE_WEIGHT,
    EXPLICIT_END_BONUS, LOCATION_BONUS, MISSING_DATE_PENALTY, MISSING_TIME_PENALTY,
    PLACEHOLDER_TITLES, PLACEHOLDER_TITLE_PENALTY, STRUCTURE_MATCH_BONUS,
};
use eventsift_domain::Candidate;

/// Compute the suggestion confidence for one candidate, in [0,1].
#[must_use]
pub fn score_candidate(
    candidate: &Candidate,
    context_confidence: f64,
    structure_match_strong: bool,
) -> f64 {
    let has_title = !candidate.title.is_empty();
    let has_date = !candidate.missing_date;
    let has_time = !candidate.missing_time;
    let has_location = candidate.location.is_some();
    let has_end = candidate.has_explicit_end;

    let completeness = weight_if(has_title, COMPLETENESS_TITLE_WEIGHT)
        + weight_if(has_date, COMPLETENESS_DATE_WEIGHT)
        + weight_if(has_location, COMPLETENESS_LOCATION_WEIGHT)
        + weight_if(has_end, COMPLETENESS_END_WEIGHT);

    let base = BASE_FIELD_WEIGHT * candidate.field_confidence
        + BASE_CONTEXT_WEIGHT * context_confidence.clamp(0.0, 1.0)
        + BASE_COMPLETENESS_WEIGHT * completeness;

    // Date and time penalties are deliberately independent and additive:
    // a candidate missing both must score materially lower than one
    // missing either. The date/time coupling is handled in dedup
    // keyability, not here.
    let mut penalties = 0.0;
    if !has_date {
        penalties += MISSING_DATE_PENALTY;
    }
    if !has_time {
        penalties += MISSING_TIME_PENALTY;
    }
    if is_placeholder_title(&candidate.title) {
        penalties += PLACEHOLDER_TITLE_PENALTY;
    }

    let mut bonuses = 0.0;
    if structure_match_strong {
        bonuses += STRUCTURE_MATCH_BONUS;
    }
    if has_location {
        bonuses += LOCATION_BONUS;
    }
    if has_end {
        bonuses += EXPLICIT_END_BONUS;
    }

    (base - penalties + bonuses).clamp(0.0, 1.0)
}

fn weight_if(present: bool, weight: f64) -> f64 {
    if present {
        weight
    } else {
        0.0
    }
}

/// Whole-string, case-insensitive match against the generic placeholders
fn is_placeholder_title(title: &str) -> bool {
    let lowered = title.trim().to_lowercase();
    PLACEHOLDER_TITLES.iter().any(|p| *p == lowered)
}
