use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Duration;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::AccessToken;
use crate::domain::authentication::models::CurrentUser;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::ports::UserRepository;

/// Login and per-request identity resolution.
///
/// Holds no per-request state: the authenticator (signing key, clock) is
/// shared read-only and every resolution performs at most one store lookup.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    token_ttl: Duration,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    pub fn new(
        repository: Arc<UR>,
        authenticator: Arc<Authenticator>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            authenticator,
            token_ttl,
        }
    }

    async fn resolve_token(&self, token: &str) -> Result<User, AuthError> {
        let claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::warn!(error = %e, "Token validation failed");
            AuthError::NotValidated
        })?;

        let user_id = claims.user_id.map(UserId).ok_or(AuthError::NotValidated)?;

        match self.repository.find_by_id(&user_id).await? {
            Some(user) => Ok(user),
            None => {
                tracing::warn!(user_id = %user_id, "Token subject no longer exists");
                Err(AuthError::NotValidated)
            }
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let user = match Username::new(username.to_string()) {
            Ok(username) => self.repository.find_by_username(&username).await?,
            Err(_) => None,
        };

        let verified = self
            .authenticator
            .verify_credentials(password, user.as_ref().map(|u| u.password_hash.as_str()));

        match (user, verified) {
            (Some(user), Ok(())) if user.is_active => Ok(user),
            _ => {
                tracing::warn!("Login rejected");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    fn issue_token(&self, user: &User, ttl: Duration) -> Result<AccessToken, AuthError> {
        let issued = self
            .authenticator
            .issue_token(user.id.0, user.username.as_str(), user.role, ttl)
            .map_err(|e| AuthError::TokenIssuance(e.to_string()))?;

        Ok(AccessToken::bearer(issued.access_token, issued.expires_at))
    }

    async fn login(&self, username: &str, password: &str) -> Result<AccessToken, AuthError> {
        let user = self.authenticate(username, password).await?;
        let token = self.issue_token(&user, self.token_ttl)?;

        tracing::info!(user_id = %user.id, expires_at = %token.expires_at, "Access token issued");

        Ok(token)
    }

    async fn resolve_optional(&self, token: Option<&str>) -> Result<CurrentUser, AuthError> {
        match token {
            None => Ok(CurrentUser::Anonymous),
            Some(token) => self.resolve_token(token).await.map(CurrentUser::Authenticated),
        }
    }

    async fn resolve_required(&self, token: Option<&str>) -> Result<User, AuthError> {
        let token = token.ok_or(AuthError::Unauthenticated)?;
        self.resolve_token(token).await
    }
}
