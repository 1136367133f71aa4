//! Credential handling for the chirpy service
//!
//! Provides the stateless building blocks request handlers need:
//! - Password hashing (Argon2id, self-describing PHC records)
//! - Session token issuance and verification (HS256 JWT)
//! - Bearer credential extraction from `Authorization` headers
//! - An `Authenticator` tying the three together
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use chirpy_auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use chirpy_auth::jwt::{make_token, validate_token};
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let user_id = Uuid::new_v4();
//! let token = make_token(user_id, b"secret_key_at_least_32_bytes_long!", Duration::hours(1)).unwrap();
//! let subject = validate_token(&token, b"secret_key_at_least_32_bytes_long!").unwrap();
//! assert_eq!(subject, user_id);
//! ```
//!
//! ## Bearer Extraction
//! ```
//! use chirpy_auth::extract_bearer_token;
//!
//! assert_eq!(extract_bearer_token(" Bearer   abc123 ").unwrap(), "abc123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use chirpy_auth::Authenticator;
//! use uuid::Uuid;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//! let user_id = Uuid::new_v4();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", &hash, user_id).unwrap();
//!
//! // Later requests: resolve the caller from the Authorization header
//! let header = format!("Bearer {}", result.access_token);
//! assert_eq!(auth.authorize(&header).unwrap(), user_id);
//! ```

pub mod authenticator;
pub mod bearer;
pub mod config;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use bearer::bearer_token_from_headers;
pub use bearer::extract_bearer_token;
pub use bearer::BearerError;
pub use config::AuthConfig;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SessionClaims;
pub use password::PasswordError;
pub use password::PasswordHasher;
