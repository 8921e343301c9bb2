//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A mood label is not one of the known moods.
    #[error("unknown mood: {0}")]
    UnknownMood(String),

    /// A mood score is outside the accepted 1-10 range.
    #[error("mood score {0} is outside 1-10")]
    MoodScoreOutOfRange(u8),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
