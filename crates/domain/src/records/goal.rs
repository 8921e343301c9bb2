//! Goal records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Life area a goal belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    /// Physical health
    Health,
    /// Work and career
    Career,
    /// Family and friends
    Relationships,
    /// Personal growth
    Personal,
    /// Money
    Financial,
    /// Learning
    Education,
    /// Meditation and awareness
    Mindfulness,
    /// A category this client does not know
    #[serde(other)]
    Unknown,
}

/// Lifecycle of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    /// Being worked on
    #[default]
    Active,
    /// Reached
    Completed,
    /// On hold
    Paused,
    /// Given up
    Abandoned,
    /// A status this client does not know
    #[serde(other)]
    Unknown,
}

/// A checkpoint on the way to a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    /// Milestone id
    pub id: String,
    /// Title
    #[serde(default)]
    pub title: String,
    /// Whether the milestone is done
    #[serde(default)]
    pub is_completed: bool,
    /// Completion timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// A user goal.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Goal id
    pub id: String,
    /// Owner id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Title
    #[serde(default)]
    pub title: String,
    /// Longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<GoalCategory>,
    /// Target date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<DateTime<Utc>>,
    /// Progress in percent, 0-100
    #[serde(default)]
    pub progress: f64,
    /// Milestones
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub milestones: Vec<Milestone>,
    /// Status
    #[serde(default)]
    pub status: GoalStatus,
    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
