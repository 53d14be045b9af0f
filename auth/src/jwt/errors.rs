use thiserror::Error;

/// Error type for JWT operations.
///
/// Decoding failures collapse into `TokenInvalid` whatever the cause
/// (bad signature, malformed structure, expiry, missing subject), so callers
/// cannot tell them apart.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is invalid")]
    TokenInvalid,

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),
}
