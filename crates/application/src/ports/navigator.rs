//! Navigation port

/// Capability to move the user to another location.
///
/// The client uses it once: to send the user to the login page after a
/// failed token refresh.
pub trait Navigator: Send + Sync {
    /// Redirects to `location`.
    fn redirect(&self, location: &str);
}

/// Navigator for contexts without page navigation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn redirect(&self, location: &str) {
        tracing::debug!(location, "navigation unavailable, redirect skipped");
    }
}
