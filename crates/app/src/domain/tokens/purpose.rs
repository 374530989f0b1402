//! Token purposes.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The single follow-up action a token authorises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenPurpose {
    /// Confirms ownership of the email address on an account.
    EmailVerify,

    /// Authorises replacing a forgotten password. Single use.
    PasswordReset,

    /// Authorises choosing the first password for an onboarded account.
    SetPassword,
}

impl TokenPurpose {
    /// All purposes, in declaration order.
    pub const ALL: [Self; 3] = [Self::EmailVerify, Self::PasswordReset, Self::SetPassword];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmailVerify => "email-verify",
            Self::PasswordReset => "password-reset",
            Self::SetPassword => "set-password",
        }
    }

    /// Whether verification also requires an unused persisted record.
    #[must_use]
    pub const fn is_revocable(self) -> bool {
        matches!(self, Self::PasswordReset)
    }
}

impl fmt::Display for TokenPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown token purpose `{0}`")]
pub struct UnknownTokenPurpose(String);

impl FromStr for TokenPurpose {
    type Err = UnknownTokenPurpose;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|purpose| purpose.as_str() == value)
            .ok_or_else(|| UnknownTokenPurpose(value.to_string()))
    }
}
