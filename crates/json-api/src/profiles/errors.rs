//! Profile Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use scoutline_app::domain::{photos::PhotoStorageError, profiles::ProfilesServiceError};

use crate::observability::record_slug_unavailable;

pub(crate) fn into_status_error(error: ProfilesServiceError) -> StatusError {
    match error {
        ProfilesServiceError::NotFound => StatusError::not_found().brief("Profile not found"),
        ProfilesServiceError::InvalidData => {
            StatusError::bad_request().brief("Display name must not be blank")
        }
        ProfilesServiceError::SlugUnavailable => {
            warn!("no free slug for display name");
            record_slug_unavailable();

            StatusError::conflict()
                .brief("That display name is too popular, try adding a middle name or initial")
        }
        ProfilesServiceError::Photo(source) => photo_status_error(source),
        ProfilesServiceError::Sql(source) => {
            error!("profile storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn photo_status_error(error: PhotoStorageError) -> StatusError {
    match error {
        PhotoStorageError::UnsupportedContentType(content_type) => {
            StatusError::unsupported_media_type()
                .brief(format!("Unsupported photo type `{content_type}`, use JPEG, PNG or WebP"))
        }
        PhotoStorageError::TooLarge { limit, .. } => {
            StatusError::payload_too_large().brief(format!("Photos must be at most {limit} bytes"))
        }
        PhotoStorageError::Empty => StatusError::bad_request().brief("Photo body is empty"),
        PhotoStorageError::InvalidPath => {
            error!("photo storage path rejected");

            StatusError::internal_server_error()
        }
        PhotoStorageError::Io(source) => {
            error!("failed to write photo: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn photo_validation_failures_are_client_errors() {
        let unsupported = photo_status_error(PhotoStorageError::UnsupportedContentType(
            "image/gif".to_string(),
        ));
        let too_large = photo_status_error(PhotoStorageError::TooLarge {
            actual: 10,
            limit: 5,
        });

        assert_eq!(unsupported.code, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(too_large.code, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn exhausted_slugs_are_a_conflict() {
        let status = into_status_error(ProfilesServiceError::SlugUnavailable);

        assert_eq!(status.code, StatusCode::CONFLICT);
    }
}
