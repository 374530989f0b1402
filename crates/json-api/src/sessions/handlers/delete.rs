//! Sign Out Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{extensions::*, sessions::errors::into_status_error, state::State};

/// Sign Out Handler
///
/// Revokes the bearer token used for this request.
#[endpoint(
    tags("sessions"),
    summary = "Sign Out",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Session revoked"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid or expired session"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "sessions.delete", skip_all, err)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.account_uuid_or_401()?;
    let token = depot.bearer_token_or_401()?;

    state
        .app
        .sessions
        .revoke(token)
        .await
        .map_err(into_status_error)?;

    tracing::info!(account_uuid = %account, "signed out");

    Ok(StatusCode::NO_CONTENT)
}
