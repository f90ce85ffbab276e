use thiserror::Error;

/// Error type for JWT operations.
///
/// Variants stay distinct for diagnostics; HTTP callers collapse every
/// verification failure into one unauthorized response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token issuer is invalid")]
    InvalidIssuer,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is not yet valid")]
    TokenNotYetValid,
}
