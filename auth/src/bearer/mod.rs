pub mod errors;
pub mod extractor;

pub use errors::BearerError;
pub use extractor::bearer_token_from_headers;
pub use extractor::extract_bearer_token;
pub use extractor::BEARER_SCHEME;
