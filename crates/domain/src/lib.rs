//! MindCompass Domain - Core types
//!
//! This crate defines the domain model for the MindCompass API client.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod error;
pub mod records;
pub mod request;
pub mod response;

pub use auth::{AuthError, AuthUser, BearerToken};
pub use error::{DomainError, DomainResult};
pub use records::{
    Goal, GoalCategory, GoalStatus, JournalEntry, Milestone, MoodEntry, MoodType,
    NotificationPreferences, PaginatedResponse, ThemePreference, UserPreferences, UserProfile,
};
pub use request::{ApiRequest, Header, Headers, HttpMethod, QueryParam, QueryParams};
pub use response::ApiResponse;
