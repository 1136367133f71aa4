pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::SessionClaims;
pub use errors::JwtError;
pub use handler::make_token;
pub use handler::validate_token;
pub use handler::JwtHandler;
pub use handler::DEFAULT_ISSUER;
