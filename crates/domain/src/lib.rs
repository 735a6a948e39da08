//! # EventSift Domain
//!
//! Business domain types and models for EventSift.
//!
//! This crate contains:
//! - Domain data types (ParsedDocument, Candidate, Group, EngineOutput, ...)
//! - Domain error types and Result definitions
//! - Engine configuration structures
//! - Domain constants (scoring weights, thresholds, format strings)
//!
//! ## Architecture
//! - No dependencies on other EventSift crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
