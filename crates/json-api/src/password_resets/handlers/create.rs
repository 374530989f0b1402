//! Request Password Reset Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    accounts::{errors::into_status_error, handlers::EmailRequest},
    extensions::*,
    state::State,
};

/// Request Password Reset Handler
///
/// Always accepted so the response does not reveal which addresses are
/// registered.
#[endpoint(
    tags("password-resets"),
    summary = "Request Password Reset",
    responses(
        (status_code = StatusCode::ACCEPTED, description = "Request accepted"),
        (status_code = StatusCode::TOO_MANY_REQUESTS, description = "Rate limited"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "password_resets.create", skip_all, err)]
pub(crate) async fn handler(
    json: JsonBody<EmailRequest>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .accounts
        .request_password_reset(&json.into_inner().email)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::ACCEPTED)
}
