//! Session Errors

use salvo::http::StatusError;
use tracing::error;

use scoutline_app::domain::sessions::SessionsServiceError;

pub(crate) fn into_status_error(error: SessionsServiceError) -> StatusError {
    match error {
        SessionsServiceError::NotFound => {
            StatusError::unauthorized().brief("Invalid or expired session")
        }
        SessionsServiceError::Sql(source) => {
            error!("session storage failure: {source}");

            StatusError::internal_server_error()
        }
        SessionsServiceError::Token(source) => {
            error!("failed to process session token: {source}");

            StatusError::internal_server_error()
        }
        SessionsServiceError::SigningKey(source) => {
            error!("session signing key rejected: {source}");

            StatusError::internal_server_error()
        }
        SessionsServiceError::InvalidLifetime => {
            error!("session lifetime is out of range");

            StatusError::internal_server_error()
        }
    }
}
