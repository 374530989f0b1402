//! Verify Email Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    accounts::{
        errors::into_status_error,
        handlers::{AccountResponse, TokenRequest},
    },
    extensions::*,
    state::State,
};

/// Verify Email Handler
#[endpoint(
    tags("accounts"),
    summary = "Confirm Email Address",
    responses(
        (status_code = StatusCode::OK, description = "Email confirmed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid or expired link"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "accounts.verify_email", skip_all, err)]
pub(crate) async fn handler(
    json: JsonBody<TokenRequest>,
    depot: &mut Depot,
) -> Result<Json<AccountResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let account = state
        .app
        .accounts
        .verify_email(&json.into_inner().token)
        .await
        .map_err(into_status_error)?;

    tracing::info!(account_uuid = %account.uuid, "verified email address");

    Ok(Json(account.into()))
}
