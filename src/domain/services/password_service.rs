use crate::domain::{error::DomainError, models::credential::HashedPassword};

const SELF_CHECK_SECRET: &str = "self-check-secret-1";

/// Service for hashing and verifying passwords.
///
/// Implementations are stateless apart from their configuration, so one
/// instance may be shared freely across threads.
pub trait PasswordHasher: Clone + Send + Sync {
    /// Hash a plain text password with a freshly drawn salt.
    ///
    /// An error means the underlying transform could not run at all; callers
    /// must treat it as fatal rather than as a rejected password.
    fn hash(&self, plain_password: &str) -> Result<HashedPassword, DomainError>;

    /// Verify a plain text password against a stored hash.
    ///
    /// A malformed or foreign hash is reported as a mismatch.
    fn verify(&self, plain_password: &str, hashed_password: &HashedPassword) -> bool;

    /// Whether a stored hash should be replaced by a fresh one, e.g. after
    /// the configured work factor changed.
    fn needs_rehash(&self, _hashed_password: &HashedPassword) -> bool {
        false
    }

    /// Round-trip a probe secret so a broken hasher is found at startup
    /// instead of on the first login.
    fn self_check(&self) -> Result<(), DomainError> {
        let probe = self.hash(SELF_CHECK_SECRET)?;
        if !self.verify(SELF_CHECK_SECRET, &probe) {
            return Err(DomainError::HashingUnavailable(
                "probe hash did not verify".to_string(),
            ));
        }
        if self.verify("not-the-probe", &probe) {
            return Err(DomainError::HashingUnavailable(
                "probe hash accepted a wrong secret".to_string(),
            ));
        }
        Ok(())
    }
}
