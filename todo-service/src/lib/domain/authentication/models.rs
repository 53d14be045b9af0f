use auth::Role;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Username exposed by the unauthenticated placeholder.
pub const UNAUTHENTICATED_USERNAME: &str = "unauthenticated_user";

/// The principal of one request, recomputed per request and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentUser {
    Authenticated(User),
    /// No token was presented on a route that allows anonymous access.
    Anonymous,
}

impl CurrentUser {
    pub fn id(&self) -> UserId {
        match self {
            CurrentUser::Authenticated(user) => user.id,
            CurrentUser::Anonymous => UserId::UNAUTHENTICATED,
        }
    }

    pub fn username(&self) -> &str {
        match self {
            CurrentUser::Authenticated(user) => user.username.as_str(),
            CurrentUser::Anonymous => UNAUTHENTICATED_USERNAME,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            CurrentUser::Authenticated(user) => user.role,
            CurrentUser::Anonymous => Role::Unauthenticated,
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            CurrentUser::Authenticated(user) => user.is_active,
            CurrentUser::Anonymous => false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, CurrentUser::Authenticated(_))
    }

    pub fn as_user(&self) -> Option<&User> {
        match self {
            CurrentUser::Authenticated(user) => Some(user),
            CurrentUser::Anonymous => None,
        }
    }
}

/// Token handed back to a caller after a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub const TOKEN_TYPE: &'static str = "bearer";

    pub fn bearer(access_token: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token,
            token_type: Self::TOKEN_TYPE,
            expires_at,
        }
    }
}
