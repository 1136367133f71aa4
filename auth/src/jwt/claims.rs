use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::errors::JwtError;

/// Claim set carried by a session token.
///
/// Timestamps are whole Unix seconds, as in RFC 7519 `NumericDate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Issuer
    pub iss: String,

    /// Subject (canonical hyphenated UUID)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Build claims for `subject`, valid from `issued_at` until `expires_at`.
    pub fn new(
        issuer: impl ToString,
        subject: Uuid,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            iss: issuer.to_string(),
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// A token is void from the second its `exp` is reached.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    /// True if `iat` lies further in the future than `leeway` seconds allow.
    pub fn is_issued_in_future(&self, current_timestamp: i64, leeway: i64) -> bool {
        self.iat > current_timestamp.saturating_add(leeway)
    }

    /// Parse the subject back into the identifier used at issuance.
    pub fn subject_id(&self) -> Result<Uuid, JwtError> {
        Uuid::parse_str(&self.sub).map_err(|e| JwtError::InvalidSubject(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_new_claims() {
        let subject = Uuid::new_v4();
        let now = Utc::now();
        let claims = SessionClaims::new("chirpy", subject, now, now + Duration::hours(1));

        assert_eq!(claims.iss, "chirpy");
        assert_eq!(claims.sub, subject.to_string());
        assert_eq!(claims.exp - claims.iat, 60 * 60);
        assert_eq!(claims.subject_id(), Ok(subject));
    }

    #[test]
    fn test_is_expired() {
        let claims = SessionClaims {
            iss: "chirpy".to_string(),
            sub: Uuid::nil().to_string(),
            iat: 0,
            exp: 1000,
        };

        assert!(!claims.is_expired(999));
        assert!(claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001));
    }

    #[test]
    fn test_is_issued_in_future() {
        let claims = SessionClaims {
            iss: "chirpy".to_string(),
            sub: Uuid::nil().to_string(),
            iat: 1060,
            exp: 2000,
        };

        assert!(!claims.is_issued_in_future(1000, 60));
        assert!(claims.is_issued_in_future(999, 60));
        assert!(claims.is_issued_in_future(1059, 0));
    }

    #[test]
    fn test_invalid_subject() {
        let claims = SessionClaims {
            iss: "chirpy".to_string(),
            sub: "not-a-uuid".to_string(),
            iat: 0,
            exp: 1000,
        };

        assert!(matches!(
            claims.subject_id(),
            Err(JwtError::InvalidSubject(_))
        ));
    }

    #[test]
    fn test_wire_field_names() {
        let claims = SessionClaims {
            iss: "chirpy".to_string(),
            sub: Uuid::nil().to_string(),
            iat: 10,
            exp: 20,
        };

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["iss"], "chirpy");
        assert_eq!(json["sub"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["iat"], 10);
        assert_eq!(json["exp"], 20);
    }
}
