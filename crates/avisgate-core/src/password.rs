use bcrypt::{DEFAULT_COST, hash, verify};
use tracing::warn;

use crate::errors::AppError;

/// Hashes and checks user passwords. Only the login and registration flows use it.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String, AppError>;

    fn verify(&self, plaintext: &str, stored_hash: &str) -> Result<bool, AppError>;
}

#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// bcrypt accepts costs from 4 to 31.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::with_cost(DEFAULT_COST)
    }
}

impl CredentialHasher for BcryptHasher {
    fn hash(&self, plaintext: &str) -> Result<String, AppError> {
        hash(plaintext, self.cost)
            .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to hash password: {}", e)))
    }

    /// A stored hash bcrypt cannot parse never matches.
    fn verify(&self, plaintext: &str, stored_hash: &str) -> Result<bool, AppError> {
        match verify(plaintext, stored_hash) {
            Ok(matched) => Ok(matched),
            Err(e) => {
                warn!(error = %e, "Stored credential hash is unreadable");
                Ok(false)
            }
        }
    }
}
