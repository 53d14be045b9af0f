//! Authentication utilities library
//!
//! Store-agnostic building blocks for the authentication flow:
//! - Password hashing (Argon2id)
//! - Signed access tokens (JWT, HMAC family)
//! - The closed set of roles carried by users and tokens
//! - An injectable clock for issuance and expiry
//!
//! Services own user lookup and decide what a failed validation means for a
//! request; this crate only answers "is this password right" and "is this
//! token genuine and current".
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Role};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify, then mint a token
//! auth.verify_credentials("password123", Some(&hash)).unwrap();
//! let issued = auth
//!     .issue_token(1, "alice", Role::User, Duration::minutes(15))
//!     .unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&issued.access_token).unwrap();
//! assert_eq!(claims.user_id, Some(1));
//! ```

pub mod authenticator;
pub mod clock;
pub mod jwt;
pub mod password;
pub mod role;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::IssuedToken;
pub use clock::Clock;
pub use clock::FixedClock;
pub use clock::SystemClock;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use role::Role;
pub use role::UnknownRoleError;
