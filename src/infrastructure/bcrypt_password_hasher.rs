use bcrypt::{HashParts, Version};
use rand_core::{OsRng, TryRngCore};
use tracing::debug;

use crate::domain::{
    error::DomainError,
    models::credential::HashedPassword,
    services::password_service::PasswordHasher,
};

/// Work factor used when none is configured
pub const DEFAULT_COST: u32 = 10;
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

const SALT_LEN: usize = 16;

/// bcrypt-backed password hasher producing `$2b$` encoded hashes
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Result<Self, DomainError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(DomainError::HashingUnavailable(format!(
                "bcrypt cost {cost} is outside {MIN_COST}..={MAX_COST}"
            )));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plain_password: &str) -> Result<HashedPassword, DomainError> {
        let mut salt = [0u8; SALT_LEN];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| DomainError::HashingUnavailable(format!("failed to draw salt: {e}")))?;

        let parts = bcrypt::hash_with_salt(plain_password, self.cost, salt)
            .map_err(|e| DomainError::HashingUnavailable(e.to_string()))?;

        Ok(HashedPassword::new(parts.format_for_version(Version::TwoB)))
    }

    fn verify(&self, plain_password: &str, hashed_password: &HashedPassword) -> bool {
        match bcrypt::verify(plain_password, hashed_password.as_str()) {
            Ok(matched) => matched,
            Err(e) => {
                debug!(error = %e, "stored hash is not a usable bcrypt hash");
                false
            }
        }
    }

    fn needs_rehash(&self, hashed_password: &HashedPassword) -> bool {
        match hashed_password.as_str().parse::<HashParts>() {
            Ok(parts) => parts.get_cost() != self.cost,
            Err(_) => true,
        }
    }
}
