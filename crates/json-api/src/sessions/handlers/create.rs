//! Sign In Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use scoutline_app::domain::sessions::records::IssuedSession;

use crate::{accounts, extensions::*, sessions::errors::into_status_error, state::State};

/// Sign In Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateSessionRequest {
    pub email: String,
    pub password: String,
}

/// Session Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionCreatedResponse {
    /// Bearer token; only ever returned here
    pub token: String,

    /// Signed in account
    pub account_uuid: Uuid,

    /// When the token stops working
    pub expires_at: String,
}

impl From<IssuedSession> for SessionCreatedResponse {
    fn from(issued: IssuedSession) -> Self {
        SessionCreatedResponse {
            token: issued.token,
            account_uuid: issued.session.account_uuid.into_uuid(),
            expires_at: issued.session.expires_at.to_string(),
        }
    }
}

/// Sign In Handler
#[endpoint(
    tags("sessions"),
    summary = "Sign In",
    responses(
        (status_code = StatusCode::CREATED, description = "Session created"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid email or password"),
        (status_code = StatusCode::TOO_MANY_REQUESTS, description = "Rate limited"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "sessions.create", skip_all, err)]
pub(crate) async fn handler(
    json: JsonBody<CreateSessionRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SessionCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let account = state
        .app
        .accounts
        .authenticate(&request.email, request.password)
        .await
        .map_err(accounts::errors::into_status_error)?;

    let issued = state
        .app
        .sessions
        .issue(account.uuid)
        .await
        .map_err(into_status_error)?;

    tracing::info!(account_uuid = %account.uuid, "signed in");

    res.status_code(StatusCode::CREATED);

    Ok(Json(issued.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use scoutline_app::domain::{
        accounts::{AccountsServiceError, MockAccountsService},
        sessions::{
            MockSessionsService, SessionTokenVersion,
            records::{SessionRecord, SessionUuid},
        },
    };

    use crate::test_helpers::{TEST_ACCOUNT_UUID, make_account, sessions_service};

    use super::*;

    fn make_service(accounts: MockAccountsService, sessions: MockSessionsService) -> Service {
        sessions_service(accounts, sessions, Router::with_path("sessions").post(handler))
    }

    fn issued_session() -> IssuedSession {
        IssuedSession {
            token: "sl_v1_issued".to_string(),
            session: SessionRecord {
                uuid: SessionUuid::new(),
                account_uuid: TEST_ACCOUNT_UUID,
                version: SessionTokenVersion::V1,
                created_at: Timestamp::UNIX_EPOCH,
                last_used_at: None,
                expires_at: Timestamp::UNIX_EPOCH,
                revoked_at: None,
            },
        }
    }

    #[tokio::test]
    async fn test_sign_in_issues_a_session() -> TestResult {
        let mut accounts = MockAccountsService::new();
        let mut sessions = MockSessionsService::new();

        accounts
            .expect_authenticate()
            .once()
            .withf(|email, password| email == "coach@example.com" && password == "right-password")
            .return_once(|_, _| Ok(make_account("coach@example.com")));

        sessions
            .expect_issue()
            .once()
            .withf(|account| *account == TEST_ACCOUNT_UUID)
            .return_once(|_| Ok(issued_session()));

        let mut res = TestClient::post("http://example.com/sessions")
            .json(&json!({ "email": "coach@example.com", "password": "right-password" }))
            .send(&make_service(accounts, sessions))
            .await;

        let body: SessionCreatedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.token, "sl_v1_issued");
        assert_eq!(body.account_uuid, TEST_ACCOUNT_UUID.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_wrong_password_returns_401_without_a_session() -> TestResult {
        let mut accounts = MockAccountsService::new();
        let mut sessions = MockSessionsService::new();

        accounts
            .expect_authenticate()
            .once()
            .return_once(|_, _| Err(AccountsServiceError::InvalidCredentials));

        sessions.expect_issue().never();

        let res = TestClient::post("http://example.com/sessions")
            .json(&json!({ "email": "coach@example.com", "password": "wrong-password" }))
            .send(&make_service(accounts, sessions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
