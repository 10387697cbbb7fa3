use crate::domain::error::DomainError;

pub const MIN_PASSWORD_LENGTH: usize = 8;
/// bcrypt only reads the first 72 bytes of a secret
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Strength rules applied to new passwords before they are hashed
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordPolicy;

impl PasswordPolicy {
    pub fn is_valid(&self, password: &str) -> bool {
        self.check(password).is_ok()
    }

    pub fn check(&self, password: &str) -> Result<(), DomainError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(DomainError::PasswordTooLong(MAX_PASSWORD_BYTES));
        }

        let has_letter = password.chars().any(char::is_alphabetic);
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        if password.chars().count() < MIN_PASSWORD_LENGTH || !has_letter || !has_digit {
            return Err(DomainError::WeakPassword(MIN_PASSWORD_LENGTH));
        }
        Ok(())
    }
}
