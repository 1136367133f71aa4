use thiserror::Error;

/// Error type for session token operations.
///
/// Each rejection reason has its own variant so callers can tell an expired
/// token apart from a forged one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token is not valid yet")]
    NotYetValid,

    #[error("Token issuer is invalid: {0}")]
    InvalidIssuer(String),

    #[error("Token subject is invalid: {0}")]
    InvalidSubject(String),
}

impl JwtError {
    /// Short stable name of the rejection kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            JwtError::EncodingFailed(_) => "encoding_failed",
            JwtError::MalformedToken(_) => "malformed_token",
            JwtError::InvalidSignature => "invalid_signature",
            JwtError::Expired => "expired",
            JwtError::NotYetValid => "not_yet_valid",
            JwtError::InvalidIssuer(_) => "invalid_issuer",
            JwtError::InvalidSubject(_) => "invalid_subject",
        }
    }
}
