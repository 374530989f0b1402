//! Upload Profile Photo Handler

use std::sync::Arc;

use salvo::{http::header::CONTENT_TYPE, prelude::*};

use scoutline_app::domain::photos::{MAX_PHOTO_BYTES, PhotoUpload};

use crate::{
    extensions::*,
    profiles::{
        errors::{into_status_error, photo_status_error},
        handlers::ProfileResponse,
    },
    state::State,
};

/// Upload Profile Photo Handler
///
/// The request body is the raw image; `Content-Type` must be JPEG, PNG or
/// WebP.
#[endpoint(
    tags("profiles"),
    summary = "Upload Profile Photo",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Photo stored"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty body"),
        (status_code = StatusCode::NOT_FOUND, description = "Save a profile first"),
        (status_code = StatusCode::PAYLOAD_TOO_LARGE, description = "Photo too large"),
        (status_code = StatusCode::UNSUPPORTED_MEDIA_TYPE, description = "Unsupported image type"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
    ),
)]
#[tracing::instrument(name = "profiles.photo", skip_all, err)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ProfileResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.account_uuid_or_401()?;

    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    // One byte over the limit is enough to report the upload as too large.
    let bytes = req
        .payload_with_max_size(MAX_PHOTO_BYTES + 1)
        .await
        .map_err(|source| {
            tracing::warn!("failed to read photo body: {source}");

            StatusError::payload_too_large()
                .brief(format!("Photos must be at most {MAX_PHOTO_BYTES} bytes"))
        })?
        .to_vec();

    let upload = PhotoUpload::new(&content_type, bytes).map_err(photo_status_error)?;

    let profile = state
        .app
        .profiles
        .set_photo(account, upload)
        .await
        .map_err(into_status_error)?;

    tracing::info!(%account, "stored profile photo");

    Ok(Json(profile.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use scoutline_app::domain::{
        photos::PhotoFormat,
        profiles::{MockProfilesService, ProfilesServiceError},
    };

    use crate::test_helpers::{TEST_ACCOUNT_UUID, make_profile, profiles_service};

    use super::*;

    fn make_service(profiles: MockProfilesService) -> Service {
        profiles_service(profiles, Router::with_path("profile/photo").put(handler))
    }

    #[tokio::test]
    async fn test_png_upload_is_stored() -> TestResult {
        let mut profiles = MockProfilesService::new();

        let mut profile = make_profile("Ada Lovelace", "ada-lovelace");

        profile.photo_url = Some("https://photos.scoutline.test/profiles/a/b.png".to_string());

        profiles
            .expect_set_photo()
            .once()
            .withf(|account, upload| {
                *account == TEST_ACCOUNT_UUID
                    && upload.format == PhotoFormat::Png
                    && upload.bytes == b"png-bytes"
            })
            .return_once(move |_, _| Ok(profile));

        let mut res = TestClient::put("http://example.com/profile/photo")
            .add_header(CONTENT_TYPE, "image/png", true)
            .body("png-bytes")
            .send(&make_service(profiles))
            .await;

        let body: ProfileResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.photo_url.is_some(), "photo url returned");

        Ok(())
    }

    #[tokio::test]
    async fn test_unsupported_type_returns_415_without_storing() -> TestResult {
        let mut profiles = MockProfilesService::new();

        profiles.expect_set_photo().never();

        let res = TestClient::put("http://example.com/profile/photo")
            .add_header(CONTENT_TYPE, "image/gif", true)
            .body("GIF89a")
            .send(&make_service(profiles))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNSUPPORTED_MEDIA_TYPE));

        Ok(())
    }

    #[tokio::test]
    async fn test_oversized_upload_returns_413() -> TestResult {
        let mut profiles = MockProfilesService::new();

        profiles.expect_set_photo().never();

        let res = TestClient::put("http://example.com/profile/photo")
            .add_header(CONTENT_TYPE, "image/jpeg", true)
            .body(vec![0_u8; MAX_PHOTO_BYTES + 1])
            .send(&make_service(profiles))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::PAYLOAD_TOO_LARGE));

        Ok(())
    }

    #[tokio::test]
    async fn test_upload_before_profile_returns_404() -> TestResult {
        let mut profiles = MockProfilesService::new();

        profiles
            .expect_set_photo()
            .once()
            .return_once(|_, _| Err(ProfilesServiceError::NotFound));

        let res = TestClient::put("http://example.com/profile/photo")
            .add_header(CONTENT_TYPE, "image/webp", true)
            .body("webp-bytes")
            .send(&make_service(profiles))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
