use thiserror::Error;

use crate::user::errors::UserError;

/// Failures of the login and current-user resolution flow.
///
/// Each kind is scoped to one request; none is retried.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Unknown username or wrong password; the two are never distinguished.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The route requires a token and none was presented.
    #[error("Not authenticated")]
    Unauthenticated,

    /// A token was presented but is invalid, or its subject no longer exists.
    #[error("Could not validate user")]
    NotValidated,

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    #[error(transparent)]
    Repository(#[from] UserError),
}
