//! Profiles service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{photos::PhotoStorageError, slugs::SlugError};

#[derive(Debug, Error)]
pub enum ProfilesServiceError {
    #[error("profile not found")]
    NotFound,

    #[error("invalid data")]
    InvalidData,

    #[error("no slug available for this display name")]
    SlugUnavailable,

    #[error("photo rejected")]
    Photo(#[from] PhotoStorageError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ProfilesServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::NotFound,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            Some(_) | None => Self::Sql(error),
        }
    }
}

impl From<SlugError> for ProfilesServiceError {
    fn from(error: SlugError) -> Self {
        match error {
            SlugError::Exhausted { .. } => Self::SlugUnavailable,
            SlugError::Sql(error) => error.into(),
        }
    }
}
