use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::role::Role;

const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-users";

/// Authentication coordinator combining password verification and JWT generation.
///
/// Holds the signing key for the lifetime of the process; nothing mutates it
/// after construction.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    clock: Arc<dyn Clock>,
    dummy_hash: String,
}

/// A freshly signed access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Authenticator signing with HS256 against the wall clock.
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self::with_handler(JwtHandler::new(jwt_secret), Arc::new(SystemClock))
    }

    /// Authenticator over an explicit token handler and clock.
    pub fn with_handler(jwt_handler: JwtHandler, clock: Arc<dyn Clock>) -> Self {
        let password_hasher = PasswordHasher::new();
        let dummy_hash = password_hasher.hash(DUMMY_PASSWORD).unwrap_or_default();

        Self {
            password_hasher,
            jwt_handler,
            clock,
            dummy_hash,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against the stored hash of the claimed account.
    ///
    /// Pass `None` when the account does not exist: the password is then
    /// checked against a dummy hash so both failure paths cost one Argon2
    /// verification.
    ///
    /// # Errors
    /// * `InvalidCredentials` - No such account, or the password does not match
    pub fn verify_credentials(
        &self,
        password: &str,
        stored_hash: Option<&str>,
    ) -> Result<(), AuthenticationError> {
        let is_valid = match stored_hash {
            Some(hash) => self.password_hasher.verify(password, hash),
            None => {
                let _ = self.password_hasher.verify(password, &self.dummy_hash);
                false
            }
        };

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(())
    }

    /// Sign a token for the given identity, valid for `ttl` from now.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(
        &self,
        user_id: i64,
        username: &str,
        role: Role,
        ttl: Duration,
    ) -> Result<IssuedToken, AuthenticationError> {
        let issued_at = self.clock.now();
        let claims = Claims::for_user(user_id, username, role, issued_at, ttl);
        let access_token = self.jwt_handler.encode(&claims)?;

        Ok(IssuedToken {
            access_token,
            expires_at: issued_at + ttl,
        })
    }

    /// Validate and decode a token at the current instant.
    ///
    /// # Errors
    /// * `TokenInvalid` - Token is malformed, forged, expired or incomplete
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler
            .decode_at(token, self.clock.now().timestamp())
    }
}
