//! Token errors.

use thiserror::Error;

use crate::domain::tokens::TokenPurpose;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token was issued for {actual}, expected {expected}")]
    PurposeMismatch {
        expected: TokenPurpose,
        actual: TokenPurpose,
    },

    #[error("token has expired")]
    Expired,

    #[error("token has already been used")]
    AlreadyUsed,

    #[error("token subject must not be empty")]
    InvalidSubject,

    #[error("token lifetime must be at least one second")]
    InvalidTtl,

    #[error("failed to encode token claims")]
    Encode(#[source] serde_json::Error),

    #[error("signing key rejected")]
    SigningKey(#[source] hmac::digest::InvalidLength),

    #[error("storage error")]
    Sql(#[source] sqlx::Error),
}

impl TokenError {
    /// Stable label for logs and metrics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Malformed => "malformed",
            Self::InvalidSignature => "invalid_signature",
            Self::PurposeMismatch { .. } => "purpose_mismatch",
            Self::Expired => "expired",
            Self::AlreadyUsed => "already_used",
            Self::InvalidSubject => "invalid_subject",
            Self::InvalidTtl => "invalid_ttl",
            Self::Encode(_) => "encode",
            Self::SigningKey(_) => "signing_key",
            Self::Sql(_) => "storage",
        }
    }

    /// Whether this is a rejection of a presented link, as opposed to a
    /// server-side fault. Rejections are reported to users as one generic
    /// "invalid or expired link" message.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Malformed
                | Self::InvalidSignature
                | Self::PurposeMismatch { .. }
                | Self::Expired
                | Self::AlreadyUsed
        )
    }
}

impl From<sqlx::Error> for TokenError {
    fn from(error: sqlx::Error) -> Self {
        Self::Sql(error)
    }
}
