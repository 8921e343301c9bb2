//! Journal entry records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MoodType;

/// A journal entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// Entry id
    pub id: String,
    /// Owner id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Optional title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Entry text
    #[serde(default)]
    pub content: String,
    /// Mood recorded with the entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<MoodType>,
    /// Mood score recorded with the entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood_score: Option<f64>,
    /// Tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Whether the entry is private
    #[serde(default)]
    pub is_private: bool,
    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
