//! Group assembly
//!
//! Turns scored candidates plus structure verdicts into presentable
//! groups. Structured members get the structure bonus and the group's
//! rationale in their explanation; every unclaimed candidate becomes a
//! singleton group. Output ordering is deterministic: group confidence
//! descending, structured groups before singletons on ties, then earliest
//! start.

use std::collections::HashSet;

use eventsift_domain::constants::{CUE_TITLE_TRUNCATE, GROUP_CONFIDENCE_TOP_MEMBERS};
use eventsift_domain::utils::title::truncate_text;
use eventsift_domain::{
    Candidate, DocumentContext, Group, GroupType, Member, SourceRef, StructureGroupDef,
};

use crate::suggestion::explain::build_explanation;
use crate::suggestion::scorer::score_candidate;

/// Assemble the final group list from deduplicated candidates and the
/// structure groups detected over them.
#[must_use]
pub fn assemble_groups(
    candidates: &[Candidate],
    structure_groups: &[StructureGroupDef],
    context: &DocumentContext,
) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    let mut claimed: HashSet<&str> = HashSet::new();

    for def in structure_groups {
        let members: Vec<&Candidate> = def
            .member_ids
            .iter()
            .filter_map(|id| candidates.iter().find(|c| c.id == *id))
            .collect();
        if members.is_empty() {
            continue;
        }
        claimed.extend(members.iter().map(|c| c.id.as_str()));
        groups.push(structured_group(&members, def, context));
    }

    for candidate in candidates {
        if !claimed.contains(candidate.id.as_str()) {
            groups.push(singleton_group(candidate, context));
        }
    }

    sort_groups(&mut groups);
    groups
}

/// The structure boost is folded into the published group confidence, not
/// kept as an internal tie-break: a detected trip/agenda/series should
/// rank above an equally-scored singleton in the output.
fn structured_group(
    members: &[&Candidate],
    def: &StructureGroupDef,
    context: &DocumentContext,
) -> Group {
    let mut built: Vec<Member> = members
        .iter()
        .map(|candidate| {
            let confidence = score_candidate(candidate, context.confidence, true);
            build_member(candidate, confidence, Some(def), context)
        })
        .collect();

    // Start ascending, confidence descending on equal starts
    built.sort_by(|a, b| {
        a.start.cmp(&b.start).then_with(|| {
            b.suggestion_confidence
                .partial_cmp(&a.suggestion_confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    });

    let mut confidence = top_member_average(&built) + def.confidence_boost;
    if starts_non_decreasing(&built) {
        confidence += def.ordering_bonus;
    }

    Group {
        group_id: def.group_id.clone(),
        group_type: def.group_type,
        group_title: def.group_title.clone(),
        group_rationale: def.group_rationale.clone(),
        group_confidence: confidence.clamp(0.0, 1.0),
        members: built,
    }
}

fn singleton_group(candidate: &Candidate, context: &DocumentContext) -> Group {
    let confidence = score_candidate(candidate, context.confidence, false);
    let member = build_member(candidate, confidence, None, context);
    let title = if candidate.title.is_empty() {
        "Suggested event".to_string()
    } else {
        truncate_text(&candidate.title, CUE_TITLE_TRUNCATE)
    };

    Group {
        group_id: format!("single-{}", candidate.id),
        group_type: GroupType::None,
        group_title: title,
        group_rationale: "Standalone event with no detected structure".to_string(),
        group_confidence: confidence.clamp(0.0, 1.0),
        members: vec![member],
    }
}

fn build_member(
    candidate: &Candidate,
    confidence: f64,
    structure: Option<&StructureGroupDef>,
    context: &DocumentContext,
) -> Member {
    Member {
        id: candidate.id.clone(),
        title: candidate.title.clone(),
        start: candidate.start.clone(),
        end: candidate.end.clone(),
        location: candidate.location.clone(),
        suggestion_confidence: confidence.clamp(0.0, 1.0),
        explanation: build_explanation(candidate, confidence.clamp(0.0, 1.0), structure, context),
        source: SourceRef {
            document_id: candidate.source_document_id.clone(),
            line_hints: candidate.source_line_hints.clone(),
        },
    }
}

/// Average of the two strongest member confidences (or the single member)
fn top_member_average(members: &[Member]) -> f64 {
    let mut confidences: Vec<f64> =
        members.iter().map(|m| m.suggestion_confidence).collect();
    confidences.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    confidences.truncate(GROUP_CONFIDENCE_TOP_MEMBERS);
    if confidences.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let count = confidences.len() as f64;
    confidences.iter().sum::<f64>() / count
}

fn starts_non_decreasing(members: &[Member]) -> bool {
    members.windows(2).all(|pair| pair[0].start <= pair[1].start)
}

fn sort_groups(groups: &mut [Group]) {
    groups.sort_by(|a, b| {
        b.group_confidence
            .partial_cmp(&a.group_confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| structured_rank(a).cmp(&structured_rank(b)))
            .then_with(|| earliest_start(a).cmp(earliest_start(b)))
            .then_with(|| a.group_id.cmp(&b.group_id))
    });
}

fn structured_rank(group: &Group) -> u8 {
    u8::from(group.group_type == GroupType::None)
}

fn earliest_start(group: &Group) -> &str {
    group.members.first().map_or("", |m| m.start.as_str())
}
