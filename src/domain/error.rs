//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the hierarchy and filter rules.
/// These are independent of file and terminal concerns.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid level range: min {min} is greater than max {max}")]
    InvalidLevelRange { min: u32, max: u32 },

    #[error("unknown root: {0} (neither a node name nor a father)")]
    UnknownRoot(String),

    #[error("cycle detected in hierarchy: {0}")]
    CycleDetected(String),
}
