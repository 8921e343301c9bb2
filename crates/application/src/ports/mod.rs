//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the API client and external systems.
//! Each port is a trait that can be implemented by adapters in the
//! infrastructure layer or by fakes in tests.

mod auth_session;
mod http_transport;
mod navigator;

pub use auth_session::{AnonymousSession, AuthSession};
pub use http_transport::{HttpTransport, PreparedRequest, TransportError};
pub use navigator::{Navigator, NoopNavigator};
