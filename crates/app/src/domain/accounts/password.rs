//! Password hashing and verification using Argon2id.

use argon2::{
    Argon2,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use crate::domain::accounts::AccountsServiceError;

pub const MIN_PASSWORD_CHARS: usize = 8;
pub const MAX_PASSWORD_CHARS: usize = 128;

/// Check length bounds, counted in characters.
///
/// # Errors
///
/// Returns [`AccountsServiceError::InvalidPassword`] outside the bounds.
pub fn validate_password(password: &str) -> Result<(), AccountsServiceError> {
    let chars = password.chars().count();

    if (MIN_PASSWORD_CHARS..=MAX_PASSWORD_CHARS).contains(&chars) {
        Ok(())
    } else {
        Err(AccountsServiceError::InvalidPassword)
    }
}

/// Hash a validated password into a PHC string.
///
/// # Errors
///
/// Returns an error if the password is out of bounds or hashing fails.
pub fn hash_password(password: &str) -> Result<String, AccountsServiceError> {
    validate_password(password)?;

    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|error| AccountsServiceError::PasswordHash(error.to_string()))
}

/// Constant-time check of `password` against a stored PHC string.
///
/// # Errors
///
/// Returns an error only when the stored hash is unreadable.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AccountsServiceError> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|error| AccountsServiceError::PasswordHash(error.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(error) => Err(AccountsServiceError::PasswordHash(error.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() -> TestResult {
        let hash = hash_password("correct horse battery")?;

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse battery", &hash)?);
        assert!(!verify_password("wrong horse battery", &hash)?);

        Ok(())
    }

    #[test]
    fn length_bounds_are_enforced() {
        assert!(validate_password("short").is_err());
        assert!(validate_password(&"x".repeat(MIN_PASSWORD_CHARS)).is_ok());
        assert!(validate_password(&"x".repeat(MAX_PASSWORD_CHARS)).is_ok());
        assert!(validate_password(&"x".repeat(MAX_PASSWORD_CHARS + 1)).is_err());
        assert!(validate_password("ñandú-ñandú").is_ok(), "counted in characters");
    }

    #[test]
    fn unreadable_hash_is_an_error() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AccountsServiceError::PasswordHash(_))
        ));
    }
}
