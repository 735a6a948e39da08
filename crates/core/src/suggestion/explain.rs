//! Explanation generation for suggestion members
//!
//! Each member gets a one-line classification sentence plus up to four
//! bullets: strongest observed cues, a missing-field warning or a
//! high-confidence note, the grouping rationale when structured, and a
//! numeric summary. All free text is redacted of email/phone-shaped
//! substrings and length-capped before emission.

use eventsift_common::redact_pii;
use eventsift_domain::constants::{
    CUE_LOCATION_TRUNCATE, CUE_TITLE_TRUNCATE, HIGH_CONFIDENCE_NOTE_THRESHOLD,
    MAX_EXPLANATION_BULLETS, MAX_EXPLANATION_LENGTH,
};
use eventsift_domain::utils::title::truncate_text;
use eventsift_domain::{Candidate, DocumentContext, Explanation, GroupType, StructureGroupDef};

/// Build the explanation for one member.
#[must_use]
pub fn build_explanation(
    candidate: &Candidate,
    confidence: f64,
    structure: Option<&StructureGroupDef>,
    context: &DocumentContext,
) -> Explanation {
    let title = classification_sentence(structure, context);

    let mut bullets: Vec<String> = Vec::new();

    // Strongest observed cues: one when a rationale bullet will follow,
    // two otherwise
    let cue_budget = if structure.is_some() { 1 } else { 2 };
    bullets.extend(observed_cues(candidate).into_iter().take(cue_budget));

    bullets.push(quality_note(candidate, confidence));

    if let Some(def) = structure {
        bullets.push(def.group_rationale.clone());
    }

    bullets.push(format!("Suggestion confidence {:.0}%", confidence * 100.0));

    let bullets = bullets
        .into_iter()
        .take(MAX_EXPLANATION_BULLETS)
        .map(|b| sanitize(&b))
        .collect();

    Explanation { title: sanitize(&title), bullets }
}

fn classification_sentence(
    structure: Option<&StructureGroupDef>,
    context: &DocumentContext,
) -> String {
    match structure.map(|def| def.group_type) {
        Some(GroupType::Trip) => "Part of a detected trip itinerary".to_string(),
        Some(GroupType::Agenda) => "Part of a same-day agenda".to_string(),
        Some(GroupType::Series) => "Part of a recurring series".to_string(),
        _ => format!("Suggested event from a {} document", context.kind),
    }
}

fn observed_cues(candidate: &Candidate) -> Vec<String> {
    let mut cues = Vec::new();
    if !candidate.title.is_empty() {
        cues.push(format!(
            "Title cue: \"{}\"",
            truncate_text(&candidate.title, CUE_TITLE_TRUNCATE)
        ));
    }
    if let Some(location) = candidate.location.as_deref() {
        cues.push(format!("Location: {}", truncate_text(location, CUE_LOCATION_TRUNCATE)));
    }
    if !candidate.missing_date {
        cues.push(format!("Scheduled at {}", candidate.start));
    }
    cues
}

fn quality_note(candidate: &Candidate, confidence: f64) -> String {
    match (candidate.missing_date, candidate.missing_time) {
        (true, true) => "Missing date and time in source - defaults applied".to_string(),
        (true, false) => "Missing date in source - reference date applied".to_string(),
        (false, true) => "Missing time in source - defaulted to 00:00".to_string(),
        (false, false) if confidence >= HIGH_CONFIDENCE_NOTE_THRESHOLD => {
            "High confidence across extracted fields".to_string()
        }
        _ => "All date and time fields observed in source".to_string(),
    }
}

fn sanitize(text: &str) -> String {
    truncate_text(&redact_pii(text), MAX_EXPLANATION_LENGTH)
}

#[cfg(test)]
mod tests {
    use eventsift_domain::constants::ORDERING_BONUS;

    use super::*;

    fn candidate(title: &str) -> Candidate {
        Candidate {
            id: "s1".to_string(),
            title: title.to_string(),
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
        }
    }

    fn trip_def() -> StructureGroupDef {
        StructureGroupDef {
            group_id: "trip-1".to_string(),
            group_type: GroupType::Trip,
            group_title: "Trip: ZRH".to_string(),
            group_rationale: "2 travel-related events form one journey (ZRH)".to_string(),
            member_ids: vec!["s1".to_string(), "s2".to_string()],
            confidence_boost: 0.10,
            ordering_bonus: ORDERING_BONUS,
        }
    }

    #[test]
    fn test_structured_member_mentions_rationale() {
        let explanation =
            build_explanation(&candidate("Outbound flight"), 0.8, Some(&trip_def()), &DocumentContext::default());

        assert_eq!(explanation.title, "Part of a detected trip itinerary");
        assert!(explanation
            .bullets
            .iter()
            .any(|b| b.contains("travel-related events")));
    }

    #[test]
    fn test_bullet_count_and_length_caps() {
        let long_title = "Very long planning session about everything ".repeat(8);
        let mut c = candidate(&long_title);
        c.location = Some("Conference room with an unreasonably long name".to_string());

        let explanation =
            build_explanation(&c, 0.9, Some(&trip_def()), &DocumentContext::default());

        assert!(explanation.bullets.len() <= 4);
        assert!(explanation.bullets.iter().all(|b| b.chars().count() <= 140));
        assert!(!explanation.bullets.is_empty());
    }

    #[test]
    fn test_missing_fields_mentioned() {
        let mut c = candidate("Kickoff");
        c.missing_date = true;
        c.missing_time = true;

        let explanation = build_explanation(&c, 0.3, None, &DocumentContext::default());

        assert!(explanation.bullets.iter().any(|b| b.to_lowercase().contains("missing")));
    }

    #[test]
    fn test_high_confidence_note() {
        let explanation =
            build_explanation(&candidate("Kickoff"), 0.85, None, &DocumentContext::default());

        assert!(explanation.bullets.iter().any(|b| b.contains("High confidence")));
    }

    #[test]
    fn test_pii_redacted_from_bullets() {
        let mut c = candidate("Call anna.keller@example.com about offsite");
        c.source_text = "reach me at +41 79 555 12 34".to_string();

        let explanation = build_explanation(&c, 0.8, None, &DocumentContext::default());

        for bullet in &explanation.bullets {
            assert!(!bullet.contains("anna.keller@example.com"), "email leaked: {bullet}");
        }
    }

    #[test]
    fn test_unstructured_title_uses_context_kind() {
        let context = DocumentContext { confidence: 0.8, kind: "travel".to_string() };
        let explanation = build_explanation(&candidate("Kickoff"), 0.8, None, &context);

        assert_eq!(explanation.title, "Suggested event from a travel document");
    }

    #[test]
    fn test_confidence_summary_present_for_singletons() {
        let explanation =
            build_explanation(&candidate("Kickoff"), 0.62, None, &DocumentContext::default());

        assert!(explanation.bullets.iter().any(|b| b.contains("62%")));
    }
}
