use std::env;
use std::fmt;
use std::time::Duration;

use crate::ConfigError;

/// Shortest HMAC secret accepted at startup (256 bits).
pub const MIN_SECRET_LEN: usize = 32;

const DEFAULT_EXPIRATION_SECS: u64 = 86_400; // 24 hours

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub token_ttl: Duration,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, token_ttl: Duration) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::Invalid {
                name: "JWT_SECRET",
                reason: format!("must be at least {} bytes", MIN_SECRET_LEN),
            });
        }
        if token_ttl.is_zero() {
            return Err(ConfigError::Invalid {
                name: "JWT_EXPIRATION",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self { secret, token_ttl })
    }

    /// Reads `JWT_SECRET` (required) and `JWT_EXPIRATION` in seconds.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            env::var("JWT_SECRET").ok(),
            env::var("JWT_EXPIRATION").ok(),
        )
    }

    fn from_values(secret: Option<String>, expiration: Option<String>) -> Result<Self, ConfigError> {
        let secret = secret.ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let seconds = match expiration {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                name: "JWT_EXPIRATION",
                reason: e.to_string(),
            })?,
            None => DEFAULT_EXPIRATION_SECS,
        };

        Self::new(secret, Duration::from_secs(seconds))
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}
