//! Account Data

use crate::domain::accounts::AccountsServiceError;

/// New Account Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    /// Sign in address, normalized before it is stored.
    pub email: String,

    /// Initial password. Without one the owner is sent a set-password link.
    pub password: Option<String>,
}

/// Trim and lowercase an email address, rejecting obviously invalid ones.
///
/// # Errors
///
/// Returns [`AccountsServiceError::InvalidEmail`] unless the address has
/// exactly one `@` with something on both sides and no whitespace.
pub fn normalize_email(email: &str) -> Result<String, AccountsServiceError> {
    let email = email.trim().to_lowercase();

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(email)
    } else {
        Err(AccountsServiceError::InvalidEmail)
    }
}
