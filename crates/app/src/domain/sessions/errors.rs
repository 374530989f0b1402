//! Sessions service errors.

use sqlx::Error;
use thiserror::Error;

use crate::domain::sessions::SessionTokenError;

#[derive(Debug, Error)]
pub enum SessionsServiceError {
    /// Unknown, expired, revoked, or mismatched credential.
    #[error("session not found")]
    NotFound,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("session token processing error")]
    Token(#[source] SessionTokenError),

    #[error("session lifetime is out of range")]
    InvalidLifetime,

    #[error("signing key rejected")]
    SigningKey(#[source] hmac::digest::InvalidLength),
}

impl From<Error> for SessionsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        Self::Sql(error)
    }
}

impl From<SessionTokenError> for SessionsServiceError {
    fn from(error: SessionTokenError) -> Self {
        Self::Token(error)
    }
}
