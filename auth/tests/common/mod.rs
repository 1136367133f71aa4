#![allow(dead_code)]

use chirpy_auth::SessionClaims;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

pub const TEST_SECRET: &[u8] = b"super-secret-jwt-key-for-testing";

/// Route library logs through the test harness; `RUST_LOG` selects the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Sign arbitrary claims with HS256, bypassing the issuer's own checks.
pub fn sign_claims(issuer: &str, subject: &str, ttl: Duration) -> String {
    let now = Utc::now();
    let claims = SessionClaims {
        iss: issuer.to_string(),
        sub: subject.to_string(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(TEST_SECRET))
        .expect("Failed to sign claims")
}
