//! Identity provider adapters.
//!
//! [`FirebaseSession`] signs users in against the Firebase Auth REST API
//! and keeps their token pair fresh for the API client.

mod firebase_session;
mod wire;

pub use firebase_session::{DEFAULT_AUTH_URL, DEFAULT_TOKEN_URL, FirebaseConfig, FirebaseSession};
