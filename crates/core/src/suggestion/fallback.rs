//! Pluggable grouping fallback
//!
//! When deterministic grouping finds no structure and its best group is
//! weak, the engine may hand the candidates to an external strategy (an
//! AI-backed regrouper in production). The strategy is a port: core only
//! defines the trait and the gate; callers inject an implementation.
//! Strategy failures never surface - the engine keeps the deterministic
//! result.

use eventsift_domain::constants::AI_FALLBACK_CONFIDENCE_GATE;
use eventsift_domain::{Candidate, EventSiftError, Group, Result};

/// Everything a strategy may look at when regrouping.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackContext<'a> {
    /// Deduplicated candidates, in pipeline order
    pub candidates: &'a [Candidate],
    /// The deterministic groups the strategy is asked to improve on
    pub deterministic: &'a [Group],
}

/// A strategy's replacement grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackOutcome {
    /// Replacement groups, validated by the engine before publication
    pub groups: Vec<Group>,
    /// Short human-readable note on why the strategy regrouped
    pub reason: String,
}

/// External grouping strategy port.
pub trait GroupFallbackStrategy: Send + Sync {
    /// Propose a replacement grouping, or `Err` to decline.
    ///
    /// # Errors
    /// Returns an error when the strategy cannot or will not produce a
    /// grouping; the caller keeps its deterministic result.
    fn regroup(&self, context: FallbackContext<'_>) -> Result<FallbackOutcome>;
}

/// Strategy that always declines. Useful as a default wiring and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopGroupFallback;

impl GroupFallbackStrategy for NoopGroupFallback {
    fn regroup(&self, _context: FallbackContext<'_>) -> Result<FallbackOutcome> {
        Err(EventSiftError::Fallback("strategy declined to regroup".to_string()))
    }
}

/// Gate: fallback fires only when no structure was detected, more than one
/// candidate survived deduplication, and the best deterministic group sits
/// below the confidence gate.
#[must_use]
pub fn should_use_fallback(
    has_structure: bool,
    candidate_count: usize,
    best_group_confidence: f64,
) -> bool {
    !has_structure
        && candidate_count > 1
        && best_group_confidence < AI_FALLBACK_CONFIDENCE_GATE
}
