//! Resend Verification Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    accounts::{errors::into_status_error, handlers::EmailRequest},
    extensions::*,
    state::State,
};

/// Resend Verification Handler
///
/// Emails a fresh link to an unverified account. The response is the same
/// whether or not the address is registered.
#[endpoint(
    tags("accounts"),
    summary = "Resend Verification Email",
    responses(
        (status_code = StatusCode::ACCEPTED, description = "Request accepted"),
        (status_code = StatusCode::TOO_MANY_REQUESTS, description = "Rate limited"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "accounts.resend_verification", skip_all, err)]
pub(crate) async fn handler(
    json: JsonBody<EmailRequest>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .accounts
        .resend_verification(&json.into_inner().email)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::ACCEPTED)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use scoutline_app::domain::accounts::MockAccountsService;

    use crate::test_helpers::accounts_service;

    use super::*;

    #[tokio::test]
    async fn test_resend_returns_202() -> TestResult {
        let mut accounts = MockAccountsService::new();

        accounts
            .expect_resend_verification()
            .once()
            .withf(|email| email == "coach@example.com")
            .return_once(|_| Ok(()));

        let res = TestClient::post("http://example.com/accounts/verification")
            .json(&json!({ "email": "coach@example.com" }))
            .send(&accounts_service(
                accounts,
                Router::with_path("accounts/verification").post(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::ACCEPTED));

        Ok(())
    }
}
