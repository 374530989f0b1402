//! Links embedded in account emails.

use crate::domain::tokens::TokenPurpose;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBuilder {
    base_url: String,
}

impl LinkBuilder {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Page that consumes a token of `purpose`.
    #[must_use]
    pub fn link(&self, purpose: TokenPurpose, token: &str) -> String {
        let path = match purpose {
            TokenPurpose::EmailVerify => "verify",
            TokenPurpose::PasswordReset => "reset-password",
            TokenPurpose::SetPassword => "set-password",
        };

        format!("{}/{path}?token={token}", self.base_url)
    }
}
