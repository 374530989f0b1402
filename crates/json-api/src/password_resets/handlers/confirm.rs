//! Confirm Password Reset Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    accounts::{errors::into_status_error, handlers::TokenPasswordRequest},
    extensions::*,
    state::State,
};

/// Confirm Password Reset Handler
///
/// Consumes the emailed reset token; each token works once.
#[endpoint(
    tags("password-resets"),
    summary = "Reset Password",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Password changed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid or expired link, or invalid password"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "password_resets.confirm", skip_all, err)]
pub(crate) async fn handler(
    json: JsonBody<TokenPasswordRequest>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    state
        .app
        .accounts
        .reset_password(&request.token, request.password)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use scoutline_app::domain::{
        accounts::{AccountsServiceError, MockAccountsService},
        tokens::TokenError,
    };

    use crate::{accounts::errors::INVALID_LINK, test_helpers::accounts_service};

    use super::*;

    fn make_service(accounts: MockAccountsService) -> Service {
        accounts_service(
            accounts,
            Router::with_path("password-resets/confirm").post(handler),
        )
    }

    #[tokio::test]
    async fn test_reset_returns_204() -> TestResult {
        let mut accounts = MockAccountsService::new();

        accounts
            .expect_reset_password()
            .once()
            .withf(|token, password| token == "a.b" && password == "new-password")
            .return_once(|_, _| Ok(()));

        let res = TestClient::post("http://example.com/password-resets/confirm")
            .json(&json!({ "token": "a.b", "password": "new-password" }))
            .send(&make_service(accounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_used_and_tampered_links_look_identical() -> TestResult {
        let mut bodies = Vec::new();

        for rejection in [TokenError::AlreadyUsed, TokenError::InvalidSignature] {
            let mut accounts = MockAccountsService::new();

            accounts
                .expect_reset_password()
                .once()
                .return_once(move |_, _| Err(AccountsServiceError::Token(rejection)));

            let mut res = TestClient::post("http://example.com/password-resets/confirm")
                .json(&json!({ "token": "a.b", "password": "new-password" }))
                .send(&make_service(accounts))
                .await;

            assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

            bodies.push(res.take_string().await?);
        }

        assert!(bodies.iter().all(|body| body.contains(INVALID_LINK)));

        Ok(())
    }
}
