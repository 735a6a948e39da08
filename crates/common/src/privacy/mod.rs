//! PII pattern detection and redaction
//!
//! Portable, domain-independent helpers for scrubbing email- and
//! phone-shaped substrings out of free text before it is shown to users or
//! leaves the process.

pub mod patterns;

pub use patterns::{contains_pii, redact_pii};
