//! Create Account Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use scoutline_app::domain::accounts::data::NewAccount;

use crate::{
    accounts::{errors::into_status_error, handlers::AccountResponse},
    extensions::*,
    state::State,
};

/// Create Account Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateAccountRequest {
    pub email: String,

    /// Omit to receive a set-password link instead.
    #[serde(default)]
    pub password: Option<String>,
}

impl From<CreateAccountRequest> for NewAccount {
    fn from(request: CreateAccountRequest) -> Self {
        NewAccount {
            email: request.email,
            password: request.password,
        }
    }
}

/// Create Account Handler
///
/// Registers an account and emails a verification link, or a set-password
/// link when no password is given.
#[endpoint(
    tags("accounts"),
    summary = "Create Account",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::TOO_MANY_REQUESTS, description = "Rate limited"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "accounts.create", skip_all, err)]
pub(crate) async fn handler(
    json: JsonBody<CreateAccountRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AccountResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let account = state
        .app
        .accounts
        .register(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(account_uuid = %account.uuid, "registered account");

    res.status_code(StatusCode::CREATED);

    Ok(Json(account.into()))
}
