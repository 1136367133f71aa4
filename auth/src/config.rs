use std::env;
use std::path::Path;

use argon2::Params;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::authenticator::DEFAULT_SESSION_TTL_SECONDS;
use crate::jwt::handler::DEFAULT_ISSUED_AT_LEEWAY;
use crate::jwt::handler::DEFAULT_ISSUER;

/// Longest session lifetime `chrono::Duration` can represent in seconds.
const MAX_EXPIRATION_SECONDS: i64 = i64::MAX / 1_000;

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub expiration_seconds: i64,
    pub issued_at_leeway_seconds: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl JwtConfig {
    /// Session token lifetime.
    pub fn expiration(&self) -> Duration {
        Duration::seconds(self.expiration_seconds)
    }
}

impl AuthConfig {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (AUTH__JWT__SECRET, AUTH__PASSWORD__MEMORY_KIB, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults for everything except `jwt.secret`
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        Self::load_from(
            Path::new("config"),
            &run_mode,
            Environment::with_prefix("AUTH").separator("__"),
        )
    }

    /// Load configuration from an explicit directory, run mode and
    /// environment source.
    pub fn load_from(
        config_dir: &Path,
        run_mode: &str,
        environment: Environment,
    ) -> Result<Self, ConfigError> {
        let default_file = config_dir.join("default");
        let mode_file = config_dir.join(run_mode);

        let configuration = ConfigBuilder::builder()
            .set_default("jwt.issuer", DEFAULT_ISSUER)?
            .set_default("jwt.expiration_seconds", DEFAULT_SESSION_TTL_SECONDS)?
            .set_default("jwt.issued_at_leeway_seconds", DEFAULT_ISSUED_AT_LEEWAY)?
            .set_default("password.memory_kib", i64::from(Params::DEFAULT_M_COST))?
            .set_default("password.iterations", i64::from(Params::DEFAULT_T_COST))?
            .set_default("password.parallelism", i64::from(Params::DEFAULT_P_COST))?
            .add_source(File::with_name(&default_file.to_string_lossy()).required(false))
            .add_source(File::with_name(&mode_file.to_string_lossy()).required(false))
            .add_source(environment)
            .build()?;

        let config: AuthConfig = configuration.try_deserialize()?;
        config.validate()?;

        tracing::debug!(
            issuer = %config.jwt.issuer,
            expiration_seconds = config.jwt.expiration_seconds,
            memory_kib = config.password.memory_kib,
            iterations = config.password.iterations,
            parallelism = config.password.parallelism,
            "Auth configuration loaded"
        );

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::Message("jwt.secret must not be empty".to_string()));
        }

        if !(1..=MAX_EXPIRATION_SECONDS).contains(&self.jwt.expiration_seconds) {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_seconds must be between 1 and {}",
                MAX_EXPIRATION_SECONDS
            )));
        }

        if self.jwt.issued_at_leeway_seconds < 0 {
            return Err(ConfigError::Message(
                "jwt.issued_at_leeway_seconds must not be negative".to_string(),
            ));
        }

        Ok(())
    }
}
