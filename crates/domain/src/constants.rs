//! Domain constants
//!
//! Centralized location for the scoring weights, penalties, bonuses, and
//! thresholds used by the suggestion engine. Every tunable number lives here
//! so heuristic changes never require hunting through the pipeline stages.

// Canonical formats
pub const CANONICAL_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";
pub const CANONICAL_TIME_FORMAT: &str = "%H:%M";
pub const DEFAULT_START_TIME: &str = "00:00";

// Candidate defaults
pub const DEFAULT_DURATION_MIN: i64 = 60;
pub const DEFAULT_FIELD_CONFIDENCE: f64 = 0.5;
pub const DEFAULT_CONTEXT_CONFIDENCE: f64 = 0.5;

// Completeness term weights (each term contributes its weight or 0)
pub const COMPLETENESS_TITLE_WEIGHT: f64 = 0.35;
pub const COMPLETENESS_DATE_WEIGHT: f64 = 0.35;
pub const COMPLETENESS_LOCATION_WEIGHT: f64 = 0.15;
pub const COMPLETENESS_END_WEIGHT: f64 = 0.15;

// Base score blend
pub const BASE_FIELD_WEIGHT: f64 = 0.45;
pub const BASE_CONTEXT_WEIGHT: f64 = 0.35;
pub const BASE_COMPLETENESS_WEIGHT: f64 = 0.20;

// Penalties
pub const MISSING_DATE_PENALTY: f64 = 0.25;
pub const MISSING_TIME_PENALTY: f64 = 0.25;
pub const PLACEHOLDER_TITLE_PENALTY: f64 = 0.10;

// Bonuses
pub const STRUCTURE_MATCH_BONUS: f64 = 0.10;
pub const LOCATION_BONUS: f64 = 0.05;
pub const EXPLICIT_END_BONUS: f64 = 0.05;

/// Generic titles that carry no real signal (matched case-insensitively
/// against the whole trimmed title)
pub const PLACEHOLDER_TITLES: [&str; 4] = ["event", "termin", "meeting", "task"];

// Deduplication
pub const DEDUP_START_TOLERANCE_MIN: i64 = 5;

/// Trip-like keywords used by the umbrella-candidate drop pass
pub const UMBRELLA_TRIP_KEYWORDS: [&str; 3] = ["trip", "reise", "travel"];

// Structure detection
pub const TRIP_MAX_SPAN_DAYS: i64 = 14;
pub const TRIP_MIN_MEMBERS: usize = 2;
pub const AGENDA_MIN_MEMBERS: usize = 2;
pub const AGENDA_TOKEN_OVERLAP_MIN: f64 = 0.30;
pub const SERIES_MIN_MEMBERS: usize = 3;
pub const SERIES_MIN_SHARED_TIME: usize = 2;
pub const SERIES_TITLE_KEY_TOKENS: usize = 3;

// Group-level confidence boosts applied after member averaging
pub const TRIP_CONFIDENCE_BOOST: f64 = 0.10;
pub const AGENDA_CONFIDENCE_BOOST: f64 = 0.08;
pub const SERIES_CONFIDENCE_BOOST: f64 = 0.08;
pub const ORDERING_BONUS: f64 = 0.03;

/// Group confidence averages over this many of the strongest members
pub const GROUP_CONFIDENCE_TOP_MEMBERS: usize = 2;

// AI fallback gate
pub const AI_FALLBACK_CONFIDENCE_GATE: f64 = 0.55;

// Explanations
pub const MAX_EXPLANATION_BULLETS: usize = 4;
pub const MAX_EXPLANATION_LENGTH: usize = 140;
pub const CUE_TITLE_TRUNCATE: usize = 40;
pub const CUE_LOCATION_TRUNCATE: usize = 30;
pub const HIGH_CONFIDENCE_NOTE_THRESHOLD: f64 = 0.75;

// Title utilities
pub const TITLE_TRUNCATE_SUFFIX: &str = "...";
