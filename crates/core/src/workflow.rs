//! Suggestion review workflow
//!
//! Every member starts `Pending`. Reviewers accept or dismiss; only an
//! accepted suggestion that the user explicitly confirms may be committed
//! to the calendar. Illegal transitions are ignored rather than applied -
//! the status map never enters an invalid state.

use std::collections::HashMap;

use eventsift_domain::{EngineOutput, SuggestionStatus};

/// Initial status map for an engine output: every member `Pending`.
#[must_use]
pub fn create_status_map(output: &EngineOutput) -> HashMap<String, SuggestionStatus> {
    output
        .groups
        .iter()
        .flat_map(|group| group.members.iter())
        .map(|member| (member.id.clone(), SuggestionStatus::Pending))
        .collect()
}

/// Apply a status transition if it is legal. Returns whether the map
/// changed; unknown ids and illegal transitions leave it untouched.
pub fn set_status(
    statuses: &mut HashMap<String, SuggestionStatus>,
    member_id: &str,
    next: SuggestionStatus,
) -> bool {
    match statuses.get(member_id) {
        Some(current) if current.allows_transition_to(next) => {
            statuses.insert(member_id.to_string(), next);
            true
        }
        _ => false,
    }
}

/// Commit guard: only an accepted suggestion with explicit user
/// confirmation may reach the calendar.
#[must_use]
pub fn should_commit(status: SuggestionStatus, explicitly_confirmed: bool) -> bool {
    status == SuggestionStatus::Accepted && explicitly_confirmed
}

#[cfg(test)]
mod tests {
    use eventsift_domain::{EngineMeta, Explanation, Group, GroupType, Member, SourceRef};

    use super::*;

    fn output_with_members(ids: &[&str]) -> EngineOutput {
        let members = ids
            .iter()
            .map(|id| Member {
                id: (*id).to_string(),
                title: "Kickoff".to_string(),
                start: "2026-03-12T08:00".to_string(),
                end: "2026-03-12T09:00".to_string(),
                location: None,
                suggestion_confidence: 0.8,
                explanation: Explanation { title: "t".to_string(), bullets: vec![] },
                source: SourceRef { document_id: "doc-1".to_string(), line_hints: vec![] },
            })
            .collect();

        EngineOutput {
            groups: vec![Group {
                group_id: "single-s1".to_string(),
                group_type: GroupType::None,
                group_title: "Kickoff".to_string(),
                group_rationale: "Standalone event".to_string(),
                group_confidence: 0.8,
                members,
            }],
            meta: EngineMeta { ai_fallback_used: false, ai_fallback_reason: None },
        }
    }

    #[test]
    fn test_all_members_start_pending() {
        let statuses = create_status_map(&output_with_members(&["s1", "s2"]));
        assert_eq!(statuses.len(), 2);
        assert!(statuses.values().all(|s| *s == SuggestionStatus::Pending));
    }

    #[test]
    fn test_accept_then_commit() {
        let mut statuses = create_status_map(&output_with_members(&["s1"]));

        assert!(set_status(&mut statuses, "s1", SuggestionStatus::Accepted));
        assert!(set_status(&mut statuses, "s1", SuggestionStatus::Committed));
        assert_eq!(statuses["s1"], SuggestionStatus::Committed);
    }

    #[test]
    fn test_pending_cannot_jump_to_committed() {
        let mut statuses = create_status_map(&output_with_members(&["s1"]));

        assert!(!set_status(&mut statuses, "s1", SuggestionStatus::Committed));
        assert_eq!(statuses["s1"], SuggestionStatus::Pending);
    }

    #[test]
    fn test_dismissed_is_terminal() {
        let mut statuses = create_status_map(&output_with_members(&["s1"]));

        assert!(set_status(&mut statuses, "s1", SuggestionStatus::Dismissed));
        assert!(!set_status(&mut statuses, "s1", SuggestionStatus::Accepted));
        assert_eq!(statuses["s1"], SuggestionStatus::Dismissed);
    }

    #[test]
    fn test_unknown_id_ignored() {
        let mut statuses = create_status_map(&output_with_members(&["s1"]));

        assert!(!set_status(&mut statuses, "s9", SuggestionStatus::Accepted));
        assert_eq!(statuses.len(), 1);
    }

    #[test]
    fn test_commit_requires_explicit_confirmation() {
        assert!(should_commit(SuggestionStatus::Accepted, true));
        assert!(!should_commit(SuggestionStatus::Accepted, false));
        assert!(!should_commit(SuggestionStatus::Pending, true));
        assert!(!should_commit(SuggestionStatus::Committed, true));
    }
}
