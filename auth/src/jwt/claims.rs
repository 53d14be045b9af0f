use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::role::Role;

/// Access token payload.
///
/// `sub` carries the username and `user_id` the numeric store identity;
/// both must be present for a token to be accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Numeric user identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,

    pub role: Role,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims for a user, issued at `issued_at` and valid for `ttl`.
    pub fn for_user(
        user_id: i64,
        username: impl ToString,
        role: Role,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        let expiration = issued_at + ttl;

        Self {
            sub: Some(username.to_string()),
            user_id: Some(user_id),
            role,
            exp: Some(expiration.timestamp()),
            iat: Some(issued_at.timestamp()),
        }
    }

    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    pub fn with_user_id(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// A token is expired from its `exp` second onwards. Claims without
    /// `exp` count as expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(true, |exp| exp <= current_timestamp)
    }

    /// Both identity claims are present.
    pub fn has_identity(&self) -> bool {
        self.user_id.is_some() && self.sub.as_deref().is_some_and(|s| !s.is_empty())
    }
}

impl Default for Claims {
    fn default() -> Self {
        Self {
            sub: None,
            user_id: None,
            role: Role::Unauthenticated,
            exp: None,
            iat: None,
        }
    }
}
