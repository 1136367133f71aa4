use thiserror::Error;

/// Error type for bearer credential extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BearerError {
    #[error("Authorization header is missing")]
    MissingHeader,

    #[error("Authorization header must be in 'Bearer <token>' format")]
    MalformedScheme,

    #[error("Bearer token is empty")]
    EmptyToken,
}
