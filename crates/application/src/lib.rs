//! MindCompass Application - API client and ports
//!
//! This crate defines the application layer with:
//! - Port traits (HTTP transport, auth session, navigation)
//! - The authenticated API client and its refresh-and-replay protocol
//! - Typed helpers for the backend resources
//! - Normalized API error handling

pub mod client;
pub mod config;
pub mod error;
pub mod ports;
pub mod resources;

pub use client::{ApiClient, RequestOptions};
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult, ErrorCode, RequestFailure};
pub use ports::{
    AnonymousSession, AuthSession, HttpTransport, Navigator, NoopNavigator, PreparedRequest,
    TransportError,
};
pub use resources::{
    GoalUpdate, GoalsApi, HealthApi, HealthStatus, JournalApi, JournalEntryUpdate, JournalPage,
    MoodRange, MoodsApi, NewGoal, NewJournalEntry, NewMoodLog, ProfileUpdate, UsersApi,
};
