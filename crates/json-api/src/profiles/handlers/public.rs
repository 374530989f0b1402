//! Public Profile Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    profiles::{errors::into_status_error, handlers::ProfileResponse},
    state::State,
};

/// Public Profile Handler
///
/// Looks a profile up by its slug. No authentication.
#[endpoint(
    tags("profiles"),
    summary = "Get Public Profile",
    responses(
        (status_code = StatusCode::OK, description = "Profile"),
        (status_code = StatusCode::NOT_FOUND, description = "Profile not found"),
    ),
)]
pub(crate) async fn handler(
    slug: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProfileResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let profile = state
        .app
        .profiles
        .get_by_slug(&slug.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(profile.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use scoutline_app::domain::profiles::{MockProfilesService, ProfilesServiceError};

    use crate::test_helpers::{make_profile, profiles_service};

    use super::*;

    fn make_service(profiles: MockProfilesService) -> Service {
        profiles_service(profiles, Router::with_path("profiles/{slug}").get(handler))
    }

    #[tokio::test]
    async fn test_slug_lookup_returns_the_profile() -> TestResult {
        let mut profiles = MockProfilesService::new();

        profiles
            .expect_get_by_slug()
            .once()
            .withf(|slug| slug == "jose-alvarez-2")
            .return_once(|_| Ok(make_profile("José Álvarez", "jose-alvarez-2")));

        let mut res = TestClient::get("http://example.com/profiles/jose-alvarez-2")
            .send(&make_service(profiles))
            .await;

        let body: ProfileResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.display_name, "José Álvarez");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_slug_returns_404() -> TestResult {
        let mut profiles = MockProfilesService::new();

        profiles
            .expect_get_by_slug()
            .once()
            .return_once(|_| Err(ProfilesServiceError::NotFound));

        let res = TestClient::get("http://example.com/profiles/nobody")
            .send(&make_service(profiles))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
