//! Profile Handlers

pub(crate) mod get;
pub(crate) mod photo;
pub(crate) mod public;
pub(crate) mod update;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use scoutline_app::domain::profiles::records::ProfileRecord;

/// Profile Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProfileResponse {
    /// Public path segment: `/profiles/{slug}`
    pub slug: String,

    pub display_name: String,
    pub headline: Option<String>,
    pub organization: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,

    /// The date and time the profile was last updated
    pub updated_at: String,
}

impl From<ProfileRecord> for ProfileResponse {
    fn from(profile: ProfileRecord) -> Self {
        ProfileResponse {
            updated_at: profile.updated_at.to_string(),
            slug: profile.slug,
            display_name: profile.display_name,
            headline: profile.headline,
            organization: profile.organization,
            bio: profile.bio,
            photo_url: profile.photo_url,
        }
    }
}
