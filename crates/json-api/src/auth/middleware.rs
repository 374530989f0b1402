//! Auth middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use scoutline_app::domain::sessions::SessionsServiceError;

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req).map(ToString::to_string) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));

        return;
    };

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return;
        }
    };

    let account = match state.app.sessions.authenticate_bearer(&token).await {
        Ok(account) => account,
        Err(SessionsServiceError::NotFound) => {
            res.render(StatusError::unauthorized().brief("Invalid or expired session"));

            return;
        }
        Err(source) => {
            error!("failed to authenticate session: {source}");

            res.render(StatusError::internal_server_error());

            return;
        }
    };

    depot.insert_account_uuid(account);
    depot.insert_bearer_token(token);

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use scoutline_app::domain::{accounts::records::AccountUuid, sessions::MockSessionsService};

    use crate::test_helpers::state_with_sessions;

    use super::*;

    #[salvo::handler]
    async fn echo_account(depot: &mut Depot, res: &mut Response) {
        let account = depot
            .account_uuid_or_401()
            .ok()
            .map_or_else(|| "missing".to_string(), |uuid| uuid.to_string());

        res.render(account);
    }

    fn make_service(sessions: MockSessionsService) -> Service {
        let router = Router::new()
            .hoop(salvo::affix_state::inject(state_with_sessions(sessions)))
            .hoop(handler)
            .push(Router::new().get(echo_account));

        Service::new(router)
    }

    #[tokio::test]
    async fn test_missing_authorization_header_returns_401() -> TestResult {
        let mut sessions = MockSessionsService::new();

        sessions.expect_authenticate_bearer().never();

        let res = TestClient::get("http://example.com")
            .send(&make_service(sessions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_non_bearer_authorization_header_returns_401() -> TestResult {
        let mut sessions = MockSessionsService::new();

        sessions.expect_authenticate_bearer().never();

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Basic abc123", true)
            .send(&make_service(sessions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_session_returns_401() -> TestResult {
        let mut sessions = MockSessionsService::new();

        sessions
            .expect_authenticate_bearer()
            .once()
            .withf(|token| token == "sl_v1_abc")
            .return_once(|_| Err(SessionsServiceError::NotFound));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer sl_v1_abc", true)
            .send(&make_service(sessions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_storage_failure_returns_500() -> TestResult {
        let mut sessions = MockSessionsService::new();

        sessions
            .expect_authenticate_bearer()
            .once()
            .return_once(|_| Err(SessionsServiceError::InvalidLifetime));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer sl_v1_abc", true)
            .send(&make_service(sessions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }

    #[tokio::test]
    async fn test_valid_session_injects_account_uuid() -> TestResult {
        let account = AccountUuid::new();

        let mut sessions = MockSessionsService::new();

        sessions
            .expect_authenticate_bearer()
            .once()
            .withf(|token| token == "sl_v1_abc")
            .return_once(move |_| Ok(account));

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "bearer  sl_v1_abc ", true)
            .send(&make_service(sessions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, account.to_string());

        Ok(())
    }
}
