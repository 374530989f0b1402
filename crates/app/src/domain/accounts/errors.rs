//! Accounts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::tokens::TokenError;

#[derive(Debug, Error)]
pub enum AccountsServiceError {
    #[error("account already exists")]
    AlreadyExists,

    #[error("account not found")]
    NotFound,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("password must be between 8 and 128 characters")]
    InvalidPassword,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("token rejected")]
    Token(#[from] TokenError),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AccountsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::CheckViolation) => Self::InvalidEmail,
            Some(_) | None => Self::Sql(error),
        }
    }
}
