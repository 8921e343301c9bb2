//! Typed helpers for the backend resources.
//!
//! Each helper maps one verb and path template onto [`ApiClient`] and adds
//! nothing else.

mod goals;
mod health;
mod journal;
mod moods;
mod users;

pub use goals::{GoalUpdate, GoalsApi, NewGoal};
pub use health::{HealthApi, HealthStatus};
pub use journal::{JournalApi, JournalEntryUpdate, JournalPage, NewJournalEntry};
pub use moods::{MoodRange, MoodsApi, NewMoodLog};
pub use users::{ProfileUpdate, UsersApi};

use crate::client::ApiClient;
use crate::ports::HttpTransport;

impl<T: HttpTransport> ApiClient<T> {
    /// Health endpoint.
    #[must_use]
    pub const fn health(&self) -> HealthApi<'_, T> {
        HealthApi::new(self)
    }

    /// User profile endpoints.
    #[must_use]
    pub const fn users(&self) -> UsersApi<'_, T> {
        UsersApi::new(self)
    }

    /// Journal endpoints.
    #[must_use]
    pub const fn journal(&self) -> JournalApi<'_, T> {
        JournalApi::new(self)
    }

    /// Goal endpoints.
    #[must_use]
    pub const fn goals(&self) -> GoalsApi<'_, T> {
        GoalsApi::new(self)
    }

    /// Mood endpoints.
    #[must_use]
    pub const fn moods(&self) -> MoodsApi<'_, T> {
        MoodsApi::new(self)
    }
}

/// Percent-encodes a record id for use as a single path segment.
fn segment(id: &str) -> String {
    url::form_urlencoded::byte_serialize(id.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
