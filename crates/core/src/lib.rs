//! # EventSift Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains the suggestion-grouping engine: candidate
//! normalization, confidence scoring, deduplication, multi-event structure
//! detection, grouping, explanation generation, output-schema validation,
//! and the suggestion review workflow.
//!
//! ## Architecture Principles
//! - Only depends on `eventsift-common` and `eventsift-domain`
//! - No database, HTTP, or platform code
//! - External grouping strategies plug in via traits
//! - Synchronous, side-effect-free, deterministic transformations

pub mod suggestion;
pub mod workflow;

// Re-export the engine surface
pub use suggestion::candidate_builder::CandidateBuilder;
pub use suggestion::cues::{CueLexicon, CueMatcher};
pub use suggestion::dedup::dedup_candidates;
pub use suggestion::engine::{build_suggestion_groups, SuggestionEngine};
pub use suggestion::explain::build_explanation;
pub use suggestion::fallback::{
    should_use_fallback, FallbackContext, FallbackOutcome, GroupFallbackStrategy, NoopGroupFallback,
};
pub use suggestion::grouper::assemble_groups;
pub use suggestion::schema::{validate_output, validate_output_value};
pub use suggestion::scorer::score_candidate;
pub use suggestion::structure::{StructureDetection, StructureDetector};
pub use workflow::{create_status_map, set_status, should_commit};
