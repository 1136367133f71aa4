use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::claims::SessionClaims;
use super::errors::JwtError;
use crate::config::JwtConfig;

/// Issuer written into and required from every session token.
pub const DEFAULT_ISSUER: &str = "chirpy";

/// Seconds an `iat` may lie in the future before the token is refused.
pub const DEFAULT_ISSUED_AT_LEEWAY: i64 = 60;

/// The only signing family accepted on verification.
const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Session token issuer and verifier.
///
/// Tokens are compact JWTs signed with HS256. The signing key is passed per
/// call; the handler only holds the immutable issuer policy, so one handler
/// can be shared between any number of request tasks.
///
/// Verification runs in a fixed order:
/// 1. structure and declared algorithm,
/// 2. HMAC signature,
/// 3. claims (issuer, expiry, issued-at, subject).
///
/// No claim is looked at before the signature has been checked.
#[derive(Debug, Clone)]
pub struct JwtHandler {
    issuer: String,
    issued_at_leeway: i64,
}

impl JwtHandler {
    /// Create a handler for the default issuer with the default issued-at leeway.
    pub fn new() -> Self {
        Self {
            issuer: DEFAULT_ISSUER.to_string(),
            issued_at_leeway: DEFAULT_ISSUED_AT_LEEWAY,
        }
    }

    /// Create a handler from the `jwt` configuration section.
    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new()
            .with_issuer(&config.issuer)
            .with_issued_at_leeway(config.issued_at_leeway_seconds)
    }

    /// Set issuer.
    pub fn with_issuer(mut self, issuer: impl ToString) -> Self {
        self.issuer = issuer.to_string();
        self
    }

    /// Set how many seconds of clock skew are tolerated on `iat`.
    pub fn with_issued_at_leeway(mut self, seconds: i64) -> Self {
        self.issued_at_leeway = seconds.max(0);
        self
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Issue a token for `subject`, valid for `ttl` from now.
    ///
    /// A negative `ttl` is accepted and yields an already expired token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Empty signing key, lifetime overflow, or signing failure
    pub fn issue(
        &self,
        subject: Uuid,
        signing_key: &[u8],
        ttl: Duration,
    ) -> Result<String, JwtError> {
        self.issue_at(subject, signing_key, ttl, Utc::now())
    }

    /// Issue a token as if the current instant were `issued_at`.
    pub fn issue_at(
        &self,
        subject: Uuid,
        signing_key: &[u8],
        ttl: Duration,
        issued_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        if signing_key.is_empty() {
            tracing::warn!("Refusing to sign session token with an empty key");
            return Err(JwtError::EncodingFailed("signing key is empty".to_string()));
        }

        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or_else(|| JwtError::EncodingFailed("token lifetime overflows".to_string()))?;
        let claims = SessionClaims::new(&self.issuer, subject, issued_at, expires_at);

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(signing_key),
        )
        .map_err(|e| {
            tracing::warn!(error = %e, "Session token signing failed");
            JwtError::EncodingFailed(e.to_string())
        })?;

        tracing::debug!(subject = %subject, expires_at = claims.exp, "Session token issued");

        Ok(token)
    }

    /// Verify a token against `signing_key` at the current instant.
    ///
    /// # Returns
    /// The subject identifier the token was issued for
    ///
    /// # Errors
    /// * `MalformedToken` - Not a three segment JWT, or undecodable parts
    /// * `InvalidSignature` - Wrong key, tampered content, or non-HMAC algorithm
    /// * `InvalidIssuer` - Token was issued by someone else
    /// * `Expired` - Current time is at or past `exp`
    /// * `NotYetValid` - `iat` is beyond the tolerated clock skew
    /// * `InvalidSubject` - Signed subject is not a UUID
    pub fn verify(&self, token: &str, signing_key: &[u8]) -> Result<Uuid, JwtError> {
        self.verify_at(token, signing_key, Utc::now())
    }

    /// Verify a token as if the current instant were `now`.
    pub fn verify_at(
        &self,
        token: &str,
        signing_key: &[u8],
        now: DateTime<Utc>,
    ) -> Result<Uuid, JwtError> {
        let result = check_structure(token)
            .and_then(|()| verify_signature(token, signing_key))
            .and_then(|claims| self.validate_claims(&claims, now.timestamp()));

        if let Err(e) = &result {
            tracing::debug!(kind = e.kind(), error = %e, "Session token rejected");
        }

        result
    }

    fn validate_claims(&self, claims: &SessionClaims, now: i64) -> Result<Uuid, JwtError> {
        if claims.iss != self.issuer {
            return Err(JwtError::InvalidIssuer(claims.iss.clone()));
        }

        if claims.is_expired(now) {
            return Err(JwtError::Expired);
        }

        if claims.is_issued_in_future(now, self.issued_at_leeway) {
            return Err(JwtError::NotYetValid);
        }

        claims.subject_id()
    }
}

impl Default for JwtHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Issue a token with the default handler.
pub fn make_token(subject: Uuid, signing_key: &[u8], ttl: Duration) -> Result<String, JwtError> {
    JwtHandler::new().issue(subject, signing_key, ttl)
}

/// Verify a token with the default handler.
pub fn validate_token(token: &str, signing_key: &[u8]) -> Result<Uuid, JwtError> {
    JwtHandler::new().verify(token, signing_key)
}

/// Check the three segment layout and the declared algorithm.
///
/// Only the header is decoded here; the payload stays untouched until the
/// signature is known to be good.
fn check_structure(token: &str) -> Result<(), JwtError> {
    let segments: Vec<&str> = token.split('.').collect();
    let [header, payload, _signature] = segments.as_slice() else {
        return Err(JwtError::MalformedToken(format!(
            "expected 3 segments, found {}",
            segments.len()
        )));
    };

    if header.is_empty() || payload.is_empty() {
        return Err(JwtError::MalformedToken("empty segment".to_string()));
    }

    let header_bytes = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|e| JwtError::MalformedToken(format!("header: {}", e)))?;
    let header: serde_json::Value = serde_json::from_slice(&header_bytes)
        .map_err(|e| JwtError::MalformedToken(format!("header: {}", e)))?;

    let algorithm = header
        .get("alg")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| JwtError::MalformedToken("header has no algorithm".to_string()))?;

    match algorithm.parse::<Algorithm>() {
        Ok(alg) if HMAC_ALGORITHMS.contains(&alg) => Ok(()),
        _ => Err(JwtError::InvalidSignature),
    }
}

fn verify_signature(token: &str, signing_key: &[u8]) -> Result<SessionClaims, JwtError> {
    if signing_key.is_empty() {
        return Err(JwtError::InvalidSignature);
    }

    // Claim checks happen afterwards against an explicit clock.
    let mut validation = Validation::new(Algorithm::HS256);
    validation.algorithms = HMAC_ALGORITHMS.to_vec();
    validation.required_spec_claims.clear();
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;

    decode::<SessionClaims>(token, &DecodingKey::from_secret(signing_key), &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature
            | ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::InvalidKeyFormat => JwtError::InvalidSignature,
            _ => JwtError::MalformedToken(e.to_string()),
        })
}
