//! Multi-event structure detection
//!
//! Three independent heuristics run in a fixed order - trip, then agenda,
//! then series - over deduplicated candidates. A candidate claimed by one
//! heuristic is removed from later consideration, so each id appears in at
//! most one structure group. Unclaimed candidates stay singletons and are
//! handled by the grouper.

use std::collections::HashSet;

use chrono::NaiveDate;
use eventsift_domain::constants::{
    AGENDA_CONFIDENCE_BOOST, AGENDA_MIN_MEMBERS, AGENDA_TOKEN_OVERLAP_MIN,
    CANONICAL_DATE_FORMAT, CUE_TITLE_TRUNCATE, ORDERING_BONUS, SERIES_CONFIDENCE_BOOST,
    SERIES_MIN_MEMBERS, SERIES_MIN_SHARED_TIME, SERIES_TITLE_KEY_TOKENS, TRIP_CONFIDENCE_BOOST,
    TRIP_MAX_SPAN_DAYS, TRIP_MIN_MEMBERS,
};
use eventsift_domain::utils::title::{title_tokens, token_overlap, truncate_text};
use eventsift_domain::{Candidate, GroupType, StructureGroupDef};

use crate::suggestion::cues::CueMatcher;

/// Detection result: the structure groups found, and whether any were.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureDetection {
    pub groups: Vec<StructureGroupDef>,
    pub has_structure: bool,
}

/// Finds trip, agenda, and series clusters among candidates.
pub struct StructureDetector {
    cues: CueMatcher,
}

impl StructureDetector {
    /// Detector with the default cue lexicon
    pub fn new() -> Self {
        Self { cues: CueMatcher::new() }
    }

    /// Detector with a caller-supplied cue matcher
    pub fn with_matcher(cues: CueMatcher) -> Self {
        Self { cues }
    }

    /// Run all heuristics. Claimed candidates are removed from later
    /// passes; detection order is trip -> agenda -> series.
    #[must_use]
    pub fn detect(&self, candidates: &[Candidate]) -> StructureDetection {
        let mut claimed: HashSet<String> = HashSet::new();
        let mut groups: Vec<StructureGroupDef> = Vec::new();
        let mut seq = 0usize;

        self.detect_trips(candidates, &mut claimed, &mut groups, &mut seq);
        self.detect_agendas(candidates, &mut claimed, &mut groups, &mut seq);
        self.detect_series(candidates, &mut claimed, &mut groups, &mut seq);

        StructureDetection { has_structure: !groups.is_empty(), groups }
    }

    // --- Trip -----------------------------------------------------------

    fn detect_trips(
        &self,
        candidates: &[Candidate],
        claimed: &mut HashSet<String>,
        groups: &mut Vec<StructureGroupDef>,
        seq: &mut usize,
    ) {
        let pool: Vec<&Candidate> = candidates
            .iter()
            .filter(|c| !claimed.contains(&c.id) && self.has_trip_cue(c))
            .collect();

        // First pass: bucket by location key
        for bucket in bucket_by(&pool, |c| self.location_key(c)) {
            if bucket.len() >= TRIP_MIN_MEMBERS && self.qualifies_as_trip(&bucket) {
                groups.push(self.trip_group(&bucket, claimed, seq));
            }
        }

        // Second, document-wide pass over whatever is left: catches
        // outbound/return pairs whose free text never shares a location
        // token
        let rest: Vec<&Candidate> =
            pool.into_iter().filter(|c| !claimed.contains(&c.id)).collect();
        if rest.len() >= TRIP_MIN_MEMBERS && self.qualifies_as_trip(&rest) {
            groups.push(self.trip_group(&rest, claimed, seq));
        }
    }

    fn has_trip_cue(&self, candidate: &Candidate) -> bool {
        self.cues.has_travel_cue(&candidate.title) || self.cues.has_travel_cue(&candidate.source_text)
    }

    fn location_key(&self, candidate: &Candidate) -> String {
        if let Some(location) = candidate.location.as_deref() {
            let trimmed = location.trim();
            if !trimmed.is_empty() {
                return trimmed.to_lowercase();
            }
        }
        self.cues
            .location_code(&candidate.title)
            .or_else(|| self.cues.location_code(&candidate.source_text))
            .map_or_else(|| "route".to_string(), |code| code.to_lowercase())
    }

    fn qualifies_as_trip(&self, members: &[&Candidate]) -> bool {
        let any_outbound = members.iter().any(|c| {
            self.cues.has_outbound_cue(&c.title) || self.cues.has_outbound_cue(&c.source_text)
        });
        let any_return = members.iter().any(|c| {
            self.cues.has_return_cue(&c.title) || self.cues.has_return_cue(&c.source_text)
        });
        any_outbound || any_return || date_span_days(members) <= TRIP_MAX_SPAN_DAYS
    }

    fn trip_group(
        &self,
        members: &[&Candidate],
        claimed: &mut HashSet<String>,
        seq: &mut usize,
    ) -> StructureGroupDef {
        let mut sorted: Vec<&Candidate> = members.to_vec();
        sorted.sort_by(|a, b| a.start.cmp(&b.start));

        let first = sorted[0];
        let route = first
            .location
            .clone()
            .unwrap_or_else(|| truncate_text(&first.title, CUE_TITLE_TRUNCATE));

        StructureGroupDef {
            group_id: next_group_id("trip", seq),
            group_type: GroupType::Trip,
            group_title: format!("Trip: {route}"),
            group_rationale: format!(
                "{} travel-related events form one journey ({route})",
                sorted.len()
            ),
            member_ids: claim_ids(&sorted, claimed),
            confidence_boost: TRIP_CONFIDENCE_BOOST,
            ordering_bonus: ORDERING_BONUS,
        }
    }

    // --- Agenda ---------------------------------------------------------

    fn detect_agendas(
        &self,
        candidates: &[Candidate],
        claimed: &mut HashSet<String>,
        groups: &mut Vec<StructureGroupDef>,
        seq: &mut usize,
    ) {
        let pool: Vec<&Candidate> =
            candidates.iter().filter(|c| !claimed.contains(&c.id)).collect();

        for bucket in bucket_by(&pool, |c| c.start_date().to_string()) {
            if bucket.len() < AGENDA_MIN_MEMBERS {
                continue;
            }

            let lead = bucket[0];
            let lead_tokens = title_tokens(&lead.title);
            if lead_tokens.is_empty() {
                continue;
            }

            let members: Vec<&Candidate> = bucket
                .iter()
                .filter(|c| {
                    c.id == lead.id
                        || token_overlap(&title_tokens(&c.title), &lead_tokens)
                            >= AGENDA_TOKEN_OVERLAP_MIN
                        || token_overlap(&title_tokens(&c.source_text), &lead_tokens)
                            >= AGENDA_TOKEN_OVERLAP_MIN
                })
                .copied()
                .collect();

            if members.len() < AGENDA_MIN_MEMBERS {
                continue;
            }

            let mut sorted = members;
            sorted.sort_by(|a, b| a.start.cmp(&b.start));
            let topic = truncate_text(&lead.title, CUE_TITLE_TRUNCATE);

            groups.push(StructureGroupDef {
                group_id: next_group_id("agenda", seq),
                group_type: GroupType::Agenda,
                group_title: format!("Agenda: {topic}"),
                group_rationale: format!(
                    "{} same-day events on {} share the topic \"{topic}\"",
                    sorted.len(),
                    lead.start_date()
                ),
                member_ids: claim_ids(&sorted, claimed),
                confidence_boost: AGENDA_CONFIDENCE_BOOST,
                ordering_bonus: ORDERING_BONUS,
            });
        }
    }

    // --- Series ---------------------------------------------------------

    fn detect_series(
        &self,
        candidates: &[Candidate],
        claimed: &mut HashSet<String>,
        groups: &mut Vec<StructureGroupDef>,
        seq: &mut usize,
    ) {
        let pool: Vec<&Candidate> =
            candidates.iter().filter(|c| !claimed.contains(&c.id)).collect();

        for bucket in bucket_by(&pool, |c| series_key(c)) {
            if bucket.len() < SERIES_MIN_MEMBERS || bucket[0].title.is_empty() {
                continue;
            }
            if !has_repeating_clock_time(&bucket) {
                continue;
            }

            let mut sorted = bucket;
            sorted.sort_by(|a, b| a.start.cmp(&b.start));
            let key = series_key(sorted[0]);

            groups.push(StructureGroupDef {
                group_id: next_group_id("series", seq),
                group_type: GroupType::Series,
                group_title: format!("Series: {key}"),
                group_rationale: format!(
                    "{} events repeat the title \"{key}\" at a consistent time",
                    sorted.len()
                ),
                member_ids: claim_ids(&sorted, claimed),
                confidence_boost: SERIES_CONFIDENCE_BOOST,
                ordering_bonus: ORDERING_BONUS,
            });
        }
    }
}

impl Default for StructureDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Bucket candidates by a key, preserving first-seen bucket order.
fn bucket_by<'a, F>(pool: &[&'a Candidate], mut key_fn: F) -> Vec<Vec<&'a Candidate>>
where
    F: FnMut(&Candidate) -> String,
{
    let mut keys: Vec<String> = Vec::new();
    let mut buckets: Vec<Vec<&'a Candidate>> = Vec::new();
    for candidate in pool {
        let key = key_fn(candidate);
        match keys.iter().position(|k| *k == key) {
            Some(idx) => buckets[idx].push(candidate),
            None => {
                keys.push(key);
                buckets.push(vec![candidate]);
            }
        }
    }
    buckets
}

/// First three normalized title tokens, joined
fn series_key(candidate: &Candidate) -> String {
    title_tokens(&candidate.title)
        .into_iter()
        .take(SERIES_TITLE_KEY_TOKENS)
        .collect::<Vec<_>>()
        .join(" ")
}

/// At least two members share the same HH:MM clock time
fn has_repeating_clock_time(members: &[&Candidate]) -> bool {
    members.iter().any(|a| {
        members
            .iter()
            .filter(|b| b.id != a.id && b.start_time() == a.start_time())
            .count()
            + 1
            >= SERIES_MIN_SHARED_TIME
    })
}

/// Span in days between the earliest and latest member date. Unparseable
/// dates push the span past any trip window.
fn date_span_days(members: &[&Candidate]) -> i64 {
    let dates: Vec<NaiveDate> = members
        .iter()
        .filter_map(|c| NaiveDate::parse_from_str(c.start_date(), CANONICAL_DATE_FORMAT).ok())
        .collect();
    if dates.len() != members.len() {
        return i64::MAX;
    }
    match (dates.iter().min(), dates.iter().max()) {
        (Some(min), Some(max)) => (*max - *min).num_days(),
        _ => i64::MAX,
    }
}

fn claim_ids(members: &[&Candidate], claimed: &mut HashSet<String>) -> Vec<String> {
    let ids: Vec<String> = members.iter().map(|c| c.id.clone()).collect();
    claimed.extend(ids.iter().cloned());
    ids
}

fn next_group_id(kind: &str, seq: &mut usize) -> String {
    *seq += 1;
    format!("{kind}-{seq}")
}
