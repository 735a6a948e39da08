//! Domain types and models

pub mod document;
pub mod suggestion;
pub mod workflow;

pub use document::{DocumentContext, ExtractedItem, ParsedDocument};
pub use suggestion::{
    Candidate, EngineConfig, EngineMeta, EngineOutput, Explanation, Group, GroupType, Member,
    SourceRef, StructureGroupDef,
};
pub use workflow::SuggestionStatus;
