//! Set Password Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    accounts::{errors::into_status_error, handlers::TokenPasswordRequest},
    extensions::*,
    state::State,
};

/// Set Password Handler
///
/// Chooses the first password of an account created without one.
#[endpoint(
    tags("accounts"),
    summary = "Set Initial Password",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Password set"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid or expired link, or invalid password"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "accounts.set_password", skip_all, err)]
pub(crate) async fn handler(
    json: JsonBody<TokenPasswordRequest>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let account = state
        .app
        .accounts
        .set_password(&request.token, request.password)
        .await
        .map_err(into_status_error)?;

    tracing::info!(account_uuid = %account.uuid, "set initial password");

    Ok(StatusCode::NO_CONTENT)
}
