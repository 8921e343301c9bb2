//! Records exchanged with the MindCompass backend.
//!
//! The API client treats these as opaque payloads; they are typed here so
//! the resource helpers can offer typed request/response pairs. Every field
//! other than the record id is optional or defaulted, since the backend is
//! free to omit them.

mod goal;
mod journal;
mod mood;
mod page;
mod user;

pub use goal::{Goal, GoalCategory, GoalStatus, Milestone};
pub use journal::JournalEntry;
pub use mood::{MoodEntry, MoodType, validate_mood_score};
pub use page::PaginatedResponse;
pub use user::{NotificationPreferences, ThemePreference, UserPreferences, UserProfile};
