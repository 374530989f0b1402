//! Save Profile Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use scoutline_app::domain::profiles::data::ProfileUpdate;

use crate::{
    extensions::*,
    profiles::{errors::into_status_error, handlers::ProfileResponse},
    state::State,
};

/// Save Profile Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SaveProfileRequest {
    /// Shown on the profile and used to derive its slug
    pub display_name: String,

    #[serde(default)]
    pub headline: Option<String>,

    #[serde(default)]
    pub organization: Option<String>,

    #[serde(default)]
    pub bio: Option<String>,
}

impl From<SaveProfileRequest> for ProfileUpdate {
    fn from(request: SaveProfileRequest) -> Self {
        ProfileUpdate {
            display_name: request.display_name,
            headline: request.headline,
            organization: request.organization,
            bio: request.bio,
        }
    }
}

/// Save Profile Handler
///
/// Creates or replaces the signed in account's profile. A new or changed
/// display name gets a fresh unique slug.
#[endpoint(
    tags("profiles"),
    summary = "Save Own Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile saved"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::CONFLICT, description = "No slug available for this display name"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "profiles.update",
    skip(json, depot),
    fields(account_uuid = tracing::field::Empty, slug = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<SaveProfileRequest>,
    depot: &mut Depot,
) -> Result<Json<ProfileResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.account_uuid_or_401()?;

    let span = tracing::Span::current();

    span.record("account_uuid", tracing::field::display(account));

    let profile = state
        .app
        .profiles
        .save_profile(account, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    span.record("slug", tracing::field::display(&profile.slug));

    tracing::info!(slug = %profile.slug, "saved profile");

    Ok(Json(profile.into()))
}
