//! Suggestion review lifecycle status

use serde::{Deserialize, Serialize};

use crate::impl_domain_tag_conversions;

/// Review status of a single suggestion
///
/// Lifecycle: `pending -> {accepted, dismissed}`; `accepted -> committed`.
/// `dismissed` and `committed` are terminal. Transitions happen only through
/// explicit user action or a successful create-in-calendar call - never
/// silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionStatus {
    Pending,
    Accepted,
    Dismissed,
    Committed,
}

impl_domain_tag_conversions!(SuggestionStatus {
    Pending => "pending",
    Accepted => "accepted",
    Dismissed => "dismissed",
    Committed => "committed",
});

impl SuggestionStatus {
    /// Whether `next` is a legal transition from this status
    pub fn allows_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Accepted)
                | (Self::Pending, Self::Dismissed)
                | (Self::Accepted, Self::Committed)
        )
    }

    /// Terminal statuses never transition again
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Dismissed | Self::Committed)
    }
}
