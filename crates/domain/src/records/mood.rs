//! Mood records

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Moods a user can log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodType {
    /// Excited
    Excited,
    /// Happy
    Happy,
    /// Calm
    Calm,
    /// Neutral
    Neutral,
    /// Anxious
    Anxious,
    /// Sad
    Sad,
    /// Stressed
    Stressed,
    /// Angry
    Angry,
    /// A mood this client does not know
    #[serde(other)]
    Unknown,
}

impl MoodType {
    /// Returns every mood a user can pick.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Excited,
            Self::Happy,
            Self::Calm,
            Self::Neutral,
            Self::Anxious,
            Self::Sad,
            Self::Stressed,
            Self::Angry,
        ]
    }

    /// Returns the wire name of the mood.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excited => "excited",
            Self::Happy => "happy",
            Self::Calm => "calm",
            Self::Neutral => "neutral",
            Self::Anxious => "anxious",
            Self::Sad => "sad",
            Self::Stressed => "stressed",
            Self::Angry => "angry",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoodType {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|mood| mood.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::UnknownMood(s.to_string()))
    }
}

/// Checks that a mood score lies in 1-10.
///
/// # Errors
///
/// Returns `DomainError::MoodScoreOutOfRange` otherwise.
pub const fn validate_mood_score(score: u8) -> DomainResult<u8> {
    if matches!(score, 1..=10) {
        Ok(score)
    } else {
        Err(DomainError::MoodScoreOutOfRange(score))
    }
}

/// A logged mood.
///
/// Everything except the id is optional so that one odd entry does not
/// fail a whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    /// Entry id
    pub id: String,
    /// Owner id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Mood
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<MoodType>,
    /// Score, nominally 1-10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Optional note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Contributing factors
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub factors: Vec<String>,
    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
