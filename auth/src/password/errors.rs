use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Malformed password hash record: {0}")]
    MalformedRecord(String),

    #[error("Invalid hashing parameters: {0}")]
    InvalidParameters(String),
}
