//! Get Own Profile Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    profiles::{errors::into_status_error, handlers::ProfileResponse},
    state::State,
};

/// Get Own Profile Handler
#[endpoint(
    tags("profiles"),
    summary = "Get Own Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile"),
        (status_code = StatusCode::NOT_FOUND, description = "No profile saved yet"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProfileResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.account_uuid_or_401()?;

    let profile = state
        .app
        .profiles
        .get_profile(account)
        .await
        .map_err(into_status_error)?;

    Ok(Json(profile.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use scoutline_app::domain::profiles::{MockProfilesService, ProfilesServiceError};

    use crate::test_helpers::{TEST_ACCOUNT_UUID, make_profile, profiles_service};

    use super::*;

    fn make_service(profiles: MockProfilesService) -> Service {
        profiles_service(profiles, Router::with_path("profile").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_the_signed_in_profile() -> TestResult {
        let mut profiles = MockProfilesService::new();

        profiles
            .expect_get_profile()
            .once()
            .withf(|account| *account == TEST_ACCOUNT_UUID)
            .return_once(|_| Ok(make_profile("Ada Lovelace", "ada-lovelace")));

        let mut res = TestClient::get("http://example.com/profile")
            .send(&make_service(profiles))
            .await;

        let body: ProfileResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.slug, "ada-lovelace");

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_profile_returns_404() -> TestResult {
        let mut profiles = MockProfilesService::new();

        profiles
            .expect_get_profile()
            .once()
            .return_once(|_| Err(ProfilesServiceError::NotFound));

        let res = TestClient::get("http://example.com/profile")
            .send(&make_service(profiles))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
