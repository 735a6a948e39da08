//! Error types used throughout the suggestion engine

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for EventSift
///
/// The `Schema` variant is tagged with `[SCHEMA]` in its display form so
/// callers can classify a failure as an engine-contract defect rather than a
/// user-input problem.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum EventSiftError {
    #[error("[SCHEMA] {0}")]
    Schema(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Fallback strategy error: {0}")]
    Fallback(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for EventSift operations
pub type Result<T> = std::result::Result<T, EventSiftError>;
