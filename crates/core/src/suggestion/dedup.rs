//! Deduplication of near-identical candidates
//!
//! Key = (normalized title, date). Two keyed candidates whose starts differ
//! by at most five minutes are duplicates; the higher pre-grouping
//! confidence wins. Candidates with synthesized date or time are never
//! keyed - a defaulted field is too weak a signal to merge on. Idempotent:
//! running the pass on its own output is a no-op.

use chrono::NaiveDateTime;
use eventsift_domain::constants::{
    CANONICAL_DATETIME_FORMAT, DEDUP_START_TOLERANCE_MIN, UMBRELLA_TRIP_KEYWORDS,
};
use eventsift_domain::utils::title::normalize_title;
use eventsift_domain::Candidate;

use crate::suggestion::scorer::score_candidate;

/// Merge near-identical candidates, preserving first-seen order.
#[must_use]
pub fn dedup_candidates(candidates: &[Candidate], context_confidence: f64) -> Vec<Candidate> {
    let mut kept: Vec<Candidate> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        if candidate.missing_date || candidate.missing_time {
            kept.push(candidate.clone());
            continue;
        }

        let key = dedup_key(candidate);
        let duplicate_at = kept.iter().position(|existing| {
            !existing.missing_date
                && !existing.missing_time
                && dedup_key(existing) == key
                && starts_within_tolerance(existing, candidate)
        });

        match duplicate_at {
            Some(idx) => {
                let existing_score = score_candidate(&kept[idx], context_confidence, false);
                let incoming_score = score_candidate(candidate, context_confidence, false);
                if incoming_score > existing_score {
                    kept[idx] = candidate.clone();
                }
            }
            None => kept.push(candidate.clone()),
        }
    }

    drop_umbrella_candidates(kept)
}

fn dedup_key(candidate: &Candidate) -> (String, String) {
    (normalize_title(&candidate.title), candidate.start_date().to_string())
}

fn starts_within_tolerance(a: &Candidate, b: &Candidate) -> bool {
    match (parse_start(&a.start), parse_start(&b.start)) {
        (Some(sa), Some(sb)) => (sa - sb).num_minutes().abs() <= DEDUP_START_TOLERANCE_MIN,
        _ => false,
    }
}

fn parse_start(start: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(start, CANONICAL_DATETIME_FORMAT).ok()
}

/// Drop generic trip placeholders ("Trip", "Reise nach ...") that have no
/// location when another candidate shares the same normalized title - an
/// umbrella item must not compete with its own structured members.
fn drop_umbrella_candidates(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let normalized: Vec<String> =
        candidates.iter().map(|c| normalize_title(&c.title)).collect();

    candidates
        .iter()
        .enumerate()
        .filter(|(idx, candidate)| {
            let title = &normalized[*idx];
            let is_umbrella = candidate.location.is_none()
                && UMBRELLA_TRIP_KEYWORDS.iter().any(|kw| title.contains(kw));
            let title_shared =
                normalized.iter().enumerate().any(|(other, t)| other != *idx && t == title);
            !(is_umbrella && title_shared)
        })
        .map(|(_, candidate)| candidate.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, title: &str, start: &str, field_confidence: f64) -> Candidate {
        Candidate {
            id: id.to_string(),
            title: title.to_string(),
            start: start.to_string(),
            end: start.to_string(),
            location: None,
            field_confidence,
            missing_date: false,
            missing_time: false,
            has_explicit_end: false,
            source_text: String::new(),
            source_document_id: "doc-1".to_string(),
            source_line_hints: vec![],
        }
    }

    #[test]
    fn test_close_duplicates_keep_higher_confidence() {
        // AC: "Budget Review" 09:00 (0.6) vs "budget review" 09:04 (0.9)
        // merge into the 0.9 version
        let a = candidate("s1", "Budget Review", "2026-04-01T09:00", 0.6);
        let b = candidate("s2", "budget review", "2026-04-01T09:04", 0.9);

        let deduped = dedup_candidates(&[a, b], 0.5);

        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].id, "s2");
        assert!((deduped[0].field_confidence - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_beyond_tolerance_not_merged() {
        let a = candidate("s1", "Budget Review", "2026-04-01T09:00", 0.6);
        let b = candidate("s2", "Budget Review", "2026-04-01T09:06", 0.9);

        let deduped = dedup_candidates(&[a, b], 0.5);

        assert_eq!(deduped.len(), 2);
    }

    #[test]
    fn test_different_dates_not_merged() {
        let a = candidate("s1", "Standup", "2026-04-01T09:00", 0.6);
        let b = candidate("s2", "Standup", "2026-04-02T09:00", 0.9);

        assert_eq!(dedup_candidates(&[a, b], 0.5).len(), 2);
    }

    #[test]
    fn test_unkeyable_candidates_pass_through() {
        let mut a = candidate("s1", "Standup", "2026-04-01T09:00", 0.6);
        a.missing_date = true;
        let mut b = candidate("s2", "Standup", "2026-04-01T09:00", 0.9);
        b.missing_time = true;

        let deduped = dedup_candidates(&[a, b], 0.5);

        assert_eq!(deduped.len(), 2);
    }

    #[test]
    fn test_umbrella_trip_placeholder_dropped() {
        let umbrella = candidate("s1", "Trip Berlin", "2026-04-01T00:00", 0.5);
        let mut member = candidate("s2", "Trip Berlin", "2026-04-03T08:00", 0.8);
        member.location = Some("BER".to_string());

        let deduped = dedup_candidates(&[umbrella, member], 0.5);

        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].id, "s2");
    }

    #[test]
    fn test_umbrella_without_shared_title_kept() {
        let lone = candidate("s1", "Trip Berlin", "2026-04-01T00:00", 0.5);
        let other = candidate("s2", "Quarterly review", "2026-04-03T08:00", 0.8);

        assert_eq!(dedup_candidates(&[lone, other], 0.5).len(), 2);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let inputs = vec![
            candidate("s1", "Budget Review", "2026-04-01T09:00", 0.6),
            candidate("s2", "budget review", "2026-04-01T09:04", 0.9),
            candidate("s3", "Standup", "2026-04-01T10:00", 0.7),
            candidate("s4", "Standup", "2026-04-02T10:00", 0.7),
        ];

        let once = dedup_candidates(&inputs, 0.5);
        let twice = dedup_candidates(&once, 0.5);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_order_preserved() {
        let a = candidate("s1", "Alpha", "2026-04-01T09:00", 0.6);
        let b = candidate("s2", "Beta", "2026-04-01T10:00", 0.9);
        let c = candidate("s3", "Gamma", "2026-04-01T11:00", 0.7);

        let deduped = dedup_candidates(&[a, b, c], 0.5);
        let ids: Vec<&str> = deduped.iter().map(|c| c.id.as_str()).collect();

        assert_eq!(ids, vec!["s1", "s2", "s3"]);
    }
}
