//! Account Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use scoutline_app::domain::accounts::AccountsServiceError;

use crate::observability::record_link_failure;

/// The single message every rejected emailed link gets.
pub(crate) const INVALID_LINK: &str = "This link is invalid or has expired";

pub(crate) fn into_status_error(error: AccountsServiceError) -> StatusError {
    match error {
        AccountsServiceError::AlreadyExists => {
            StatusError::conflict().brief("An account with this email already exists")
        }
        AccountsServiceError::InvalidEmail => {
            StatusError::bad_request().brief("Invalid email address")
        }
        AccountsServiceError::InvalidPassword => {
            StatusError::bad_request().brief("Password must be between 8 and 128 characters")
        }
        AccountsServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid email or password")
        }
        AccountsServiceError::Token(source) if source.is_rejection() => {
            warn!(kind = source.kind(), "rejected emailed link: {source}");
            record_link_failure(source.kind());

            StatusError::bad_request().brief(INVALID_LINK)
        }
        AccountsServiceError::NotFound => {
            warn!("emailed link refers to a missing account");
            record_link_failure("unknown_account");

            StatusError::bad_request().brief(INVALID_LINK)
        }
        AccountsServiceError::Token(source) => {
            error!("failed to process link token: {source}");

            StatusError::internal_server_error()
        }
        AccountsServiceError::PasswordHash(source) => {
            error!("failed to hash password: {source}");

            StatusError::internal_server_error()
        }
        AccountsServiceError::Sql(source) => {
            error!("account storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
