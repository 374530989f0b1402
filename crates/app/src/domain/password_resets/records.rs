//! Password Reset Records

use jiff::Timestamp;

use crate::{domain::accounts::records::AccountUuid, uuids::typed_uuid};

typed_uuid!(
    /// Password Reset UUID
    PasswordResetUuid
);

/// Password Reset Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordResetRecord {
    pub uuid: PasswordResetUuid,

    /// Account the reset was requested for.
    pub account_uuid: AccountUuid,

    /// SHA-256 of the issued token; the raw token is never stored.
    pub token_hash: String,

    pub expires_at: Timestamp,

    /// Set once the record is consumed or superseded by a newer request.
    pub used: bool,

    pub used_at: Option<Timestamp>,

    pub created_at: Timestamp,
}

impl PasswordResetRecord {
    /// Unused and not yet lapsed.
    #[must_use]
    pub fn is_active_at(&self, now: Timestamp) -> bool {
        !self.used && self.expires_at >= now
    }
}
