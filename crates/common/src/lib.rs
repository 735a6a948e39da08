//! # EventSift Common
//!
//! Portable, domain-independent utilities shared across EventSift crates.
//!
//! Currently this is the privacy module: PII pattern detection and
//! redaction for user-visible free text.

pub mod privacy;

pub use privacy::patterns::{contains_pii, redact_pii};
