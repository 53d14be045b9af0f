use async_trait::async_trait;
use chrono::Duration;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::AccessToken;
use crate::domain::authentication::models::CurrentUser;
use crate::domain::user::models::User;

/// Port for the login and current-user resolution flow.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Check a username/password pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user, wrong password or inactive account
    /// * `Repository` - Store lookup failed
    async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError>;

    /// Mint a signed token for `user`, valid for `ttl`.
    ///
    /// # Errors
    /// * `TokenIssuance` - Signing failed
    fn issue_token(&self, user: &User, ttl: Duration) -> Result<AccessToken, AuthError>;

    /// `authenticate` followed by `issue_token` with the configured lifetime.
    async fn login(&self, username: &str, password: &str) -> Result<AccessToken, AuthError>;

    /// Resolve the principal of a route that allows anonymous access.
    ///
    /// No token yields `CurrentUser::Anonymous`; a present but invalid token
    /// is still an error.
    ///
    /// # Errors
    /// * `NotValidated` - Token invalid, expired, or its user no longer exists
    async fn resolve_optional(&self, token: Option<&str>) -> Result<CurrentUser, AuthError>;

    /// Resolve the principal of a route that requires authentication.
    ///
    /// # Errors
    /// * `Unauthenticated` - No token presented
    /// * `NotValidated` - Token invalid, expired, or its user no longer exists
    async fn resolve_required(&self, token: Option<&str>) -> Result<User, AuthError>;
}
