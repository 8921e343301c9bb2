//! Authentication domain types

mod types;

pub use types::{AuthError, AuthUser, BearerToken};
