use chrono::DateTime;
use chrono::SubsecRound;
use chrono::Duration;
use chrono::Utc;
use http::HeaderMap;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::bearer;
use crate::bearer::BearerError;
use crate::config::AuthConfig;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Default session lifetime in seconds when none is configured.
pub const DEFAULT_SESSION_TTL_SECONDS: i64 = 3600;

/// Authentication coordinator combining password verification, session token
/// issuance and bearer token checks.
///
/// Holds the signing secret so request handlers only deal with passwords,
/// subjects and header text.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    signing_key: Zeroizing<Vec<u8>>,
    session_ttl: Duration,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed session token
    pub access_token: String,

    /// Instant after which the token is refused
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("JWT error: {0}")]
    Jwt(#[from] JwtError),

    #[error("Bearer error: {0}")]
    Bearer(#[from] BearerError),
}

impl AuthenticationError {
    /// Whether the failure is the client's fault (bad password, missing or
    /// rejected token) rather than an internal malfunction.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            AuthenticationError::InvalidCredentials | AuthenticationError::Bearer(_) => true,
            AuthenticationError::Jwt(JwtError::EncodingFailed(_)) => false,
            AuthenticationError::Jwt(_) => true,
            AuthenticationError::Password(_) => false,
        }
    }
}

impl Authenticator {
    /// Create a new authenticator with default hashing cost, the default
    /// issuer and a one hour session lifetime.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(),
            signing_key: Zeroizing::new(jwt_secret.to_vec()),
            session_ttl: Duration::seconds(DEFAULT_SESSION_TTL_SECONDS),
        }
    }

    /// Create an authenticator from loaded configuration.
    ///
    /// # Errors
    /// * `PasswordError` - Configured hashing cost is rejected
    pub fn from_config(config: &AuthConfig) -> Result<Self, PasswordError> {
        Ok(Self {
            password_hasher: PasswordHasher::from_config(&config.password)?,
            jwt_handler: JwtHandler::from_config(&config.jwt),
            signing_key: Zeroizing::new(config.jwt.secret.as_bytes().to_vec()),
            session_ttl: config.jwt.expiration(),
        })
    }

    /// Replace the password hasher (e.g. a cheaper cost in tests).
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }

    /// Set session lifetime.
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a session token for `subject`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash record
    /// * `subject` - Identity the token is issued for
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored record is malformed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: Uuid,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            tracing::debug!(subject = %subject, "Password mismatch");
            return Err(AuthenticationError::InvalidCredentials);
        }

        // `exp` is carried in whole seconds, so report the same instant.
        let issued_at = Utc::now().trunc_subsecs(0);
        let access_token =
            self.jwt_handler
                .issue_at(subject, &self.signing_key, self.session_ttl, issued_at)?;

        Ok(AuthenticationResult {
            access_token,
            expires_at: (issued_at + self.session_ttl).trunc_subsecs(0),
        })
    }

    /// Issue a session token without password verification.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn generate_token(&self, subject: Uuid) -> Result<String, JwtError> {
        self.jwt_handler
            .issue(subject, &self.signing_key, self.session_ttl)
    }

    /// Verify a session token and return its subject.
    ///
    /// # Errors
    /// * `JwtError` - Token rejected
    pub fn validate_token(&self, token: &str) -> Result<Uuid, JwtError> {
        self.jwt_handler.verify(token, &self.signing_key)
    }

    /// Resolve the caller identity from `Authorization` header text.
    ///
    /// # Errors
    /// * `BearerError` - Header missing or not a bearer credential
    /// * `JwtError` - Token rejected
    pub fn authorize(&self, header: &str) -> Result<Uuid, AuthenticationError> {
        let token = bearer::extract_bearer_token(header)?;
        Ok(self.validate_token(token)?)
    }

    /// Resolve the caller identity from request headers.
    pub fn authorize_headers(&self, headers: &HeaderMap) -> Result<Uuid, AuthenticationError> {
        let token = bearer::bearer_token_from_headers(headers)?;
        Ok(self.validate_token(token)?)
    }
}
