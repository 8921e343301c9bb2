//! Identity provider port

use async_trait::async_trait;
use mindcompass_domain::{AuthError, AuthUser, BearerToken};

/// Handle on the identity provider's session.
///
/// The API client asks this port for the current user and a token on every
/// call; any caching belongs to the implementation.
#[async_trait]
pub trait AuthSession: Send + Sync {
    /// Returns the signed-in user, if any.
    fn current_user(&self) -> Option<AuthUser>;

    /// Returns an id token for `user`.
    ///
    /// With `force_refresh` the provider must bypass its cache and issue
    /// a new token.
    ///
    /// # Errors
    ///
    /// Returns an `AuthError` if the provider cannot produce a token.
    async fn id_token(&self, user: &AuthUser, force_refresh: bool)
    -> Result<BearerToken, AuthError>;
}

/// A session with nobody signed in.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymousSession;

#[async_trait]
impl AuthSession for AnonymousSession {
    fn current_user(&self) -> Option<AuthUser> {
        None
    }

    async fn id_token(
        &self,
        _user: &AuthUser,
        _force_refresh: bool,
    ) -> Result<BearerToken, AuthError> {
        Err(AuthError::NotSignedIn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_anonymous_session_has_no_user() {
        let session = AnonymousSession;
        assert_eq!(session.current_user(), None);
        assert_eq!(
            session.id_token(&AuthUser::new("u1"), false).await,
            Err(AuthError::NotSignedIn)
        );
    }
}
