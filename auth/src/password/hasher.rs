use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as PasswordHashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as _;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;
use zeroize::Zeroize;

use super::errors::PasswordError;
use crate::config::PasswordConfig;

/// Argon2id password hasher.
///
/// Produces PHC string records (`$argon2id$v=19$m=..,t=..,p=..$salt$hash`)
/// that embed everything needed to verify them later, so records created
/// under one cost setting stay verifiable after the defaults change.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Create a hasher with the default Argon2id cost
    /// (19 MiB memory, 2 iterations, 1 lane).
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Create a hasher with explicit cost parameters.
    ///
    /// # Arguments
    /// * `memory_kib` - Memory cost in KiB
    /// * `iterations` - Number of passes
    /// * `parallelism` - Degree of parallelism (lanes)
    ///
    /// # Errors
    /// * `InvalidParameters` - The combination is rejected by Argon2
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| PasswordError::InvalidParameters(e.to_string()))?;

        Ok(Self { params })
    }

    /// Create a hasher from the `password` configuration section.
    pub fn from_config(config: &PasswordConfig) -> Result<Self, PasswordError> {
        Self::with_params(config.memory_kib, config.iterations, config.parallelism)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password.
    ///
    /// Every call draws a fresh salt from the OS RNG, so hashing the same
    /// password twice yields two different records.
    ///
    /// # Errors
    /// * `HashingFailed` - Salt generation or key derivation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                tracing::warn!(error = %e, "Password hashing failed");
                PasswordError::HashingFailed(e.to_string())
            })
    }

    /// Hash a plaintext password and wipe the plaintext buffer afterwards.
    ///
    /// The buffer is zeroized on both the success and the failure path.
    pub fn hash_and_scrub(&self, password: &mut String) -> Result<String, PasswordError> {
        let result = self.hash(password);
        password.zeroize();
        result
    }

    /// Verify a plaintext password against a stored record.
    ///
    /// Derivation uses the parameters embedded in `record`, not this
    /// hasher's own. The digest comparison is constant time.
    ///
    /// # Returns
    /// `true` on match, `false` on mismatch
    ///
    /// # Errors
    /// * `MalformedRecord` - The record is not a complete Argon2 PHC string
    pub fn verify(&self, password: &str, record: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(record)
            .map_err(|e| PasswordError::MalformedRecord(e.to_string()))?;

        parsed
            .algorithm
            .as_str()
            .parse::<Algorithm>()
            .map_err(|e| PasswordError::MalformedRecord(e.to_string()))?;

        if parsed.salt.is_none() || parsed.hash.is_none() {
            return Err(PasswordError::MalformedRecord(
                "missing salt or hash".to_string(),
            ));
        }

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => Err(PasswordError::MalformedRecord(e.to_string())),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Low cost keeps the suite fast; production cost is exercised in tests/.
    fn cheap_hasher() -> PasswordHasher {
        PasswordHasher::with_params(1024, 1, 1).expect("Failed to build hasher")
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = cheap_hasher();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher
            .verify(password, &hash)
            .expect("Failed to verify password"));
        assert!(!hasher
            .verify("wrong_password", &hash)
            .expect("Failed to verify password"));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = cheap_hasher();

        let first = hasher.hash("pw1").expect("Failed to hash password");
        let second = hasher.hash("pw1").expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(hasher.verify("pw1", &first).unwrap());
        assert!(hasher.verify("pw1", &second).unwrap());
    }

    #[test]
    fn test_record_embeds_parameters() {
        let hasher = PasswordHasher::with_params(2048, 3, 2).unwrap();
        let hash = hasher.hash("password").unwrap();

        assert!(hash.starts_with("$argon2id$v=19$"));
        assert!(hash.contains("m=2048,t=3,p=2"));

        // A default hasher must still verify it from the embedded parameters.
        assert!(PasswordHasher::new().verify("password", &hash).unwrap());
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = cheap_hasher();
        let result = hasher.verify("password", "invalid_hash");
        assert!(matches!(result, Err(PasswordError::MalformedRecord(_))));
    }

    #[test]
    fn test_verify_rejects_foreign_algorithm() {
        let hasher = cheap_hasher();
        let result = hasher.verify(
            "password",
            "$scrypt$ln=4,r=8,p=1$c2FsdHNhbHQ$aGFzaGhhc2hoYXNoaGFzaA",
        );
        assert!(matches!(result, Err(PasswordError::MalformedRecord(_))));
    }

    #[test]
    fn test_verify_rejects_record_without_hash() {
        let hasher = cheap_hasher();
        let result = hasher.verify("password", "$argon2id$v=19$m=1024,t=1,p=1");
        assert!(matches!(result, Err(PasswordError::MalformedRecord(_))));
    }

    #[test]
    fn test_invalid_parameters() {
        let result = PasswordHasher::with_params(1024, 0, 1);
        assert!(matches!(result, Err(PasswordError::InvalidParameters(_))));
    }

    #[test]
    fn test_hash_and_scrub_clears_plaintext() {
        let hasher = cheap_hasher();
        let mut password = String::from("scrub_me");

        let hash = hasher
            .hash_and_scrub(&mut password)
            .expect("Failed to hash password");

        assert!(password.is_empty());
        assert!(hasher.verify("scrub_me", &hash).unwrap());
    }
}
