//! Suggestion-grouping engine
//!
//! Pipeline, leaves first: candidate builder -> scorer -> dedup ->
//! structure detector -> grouper (+ explanations) -> fallback gate ->
//! schema validator. `engine` wires the stages into one call.

pub mod candidate_builder;
pub mod cues;
pub mod dedup;
pub mod engine;
pub mod explain;
pub mod fallback;
pub mod grouper;
pub mod schema;
pub mod scorer;
pub mod structure;
