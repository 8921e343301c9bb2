//! User profile records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile of the signed-in user as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User id (matches the identity provider uid)
    pub uid: String,
    /// Email address
    #[serde(default)]
    pub email: Option<String>,
    /// Display name
    #[serde(default)]
    pub display_name: Option<String>,
    /// Profile photo URL
    #[serde(default, rename = "photoURL")]
    pub photo_url: Option<String>,
    /// Whether the email is verified
    #[serde(default)]
    pub email_verified: bool,
    /// Free-form biography
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Short goal statements shown on the profile
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub goals: Vec<String>,
    /// User preferences
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<UserPreferences>,
    /// Consecutive journaling days
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak: Option<u32>,
    /// Number of journal entries written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_entries: Option<u32>,
    /// Last activity timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active_at: Option<DateTime<Utc>>,
    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Theme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Light theme
    Light,
    /// Dark theme
    Dark,
    /// Follow the operating system
    #[default]
    System,
    /// A theme this client does not know
    #[serde(other)]
    Unknown,
}

/// Notification channels the user opted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NotificationPreferences {
    /// Email notifications
    #[serde(default)]
    pub email: bool,
    /// Push notifications
    #[serde(default)]
    pub push: bool,
    /// Daily reminders
    #[serde(default)]
    pub reminders: bool,
}

/// Per-user preferences.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    /// Theme selection
    #[serde(default)]
    pub theme: ThemePreference,
    /// Notification channels
    #[serde(default)]
    pub notifications: NotificationPreferences,
    /// Reminder time as `HH:MM`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_reminder_time: Option<String>,
    /// UI language tag
    #[serde(default)]
    pub language: String,
}
