//! Profile Records

use jiff::Timestamp;

use crate::{domain::accounts::records::AccountUuid, uuids::typed_uuid};

typed_uuid!(
    /// Profile UUID
    ProfileUuid
);

/// Profile Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    pub uuid: ProfileUuid,

    /// Owning account; each account has at most one profile.
    pub account_uuid: AccountUuid,

    pub display_name: String,

    /// Public path segment, unique across profiles.
    pub slug: String,

    pub headline: Option<String>,
    pub organization: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
