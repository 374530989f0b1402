//! Account Records

use jiff::Timestamp;

use crate::uuids::typed_uuid;

typed_uuid!(
    /// Account UUID
    AccountUuid
);

/// Account Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    /// Unique account identifier.
    pub uuid: AccountUuid,

    /// Normalized (lowercase) sign in address.
    pub email: String,

    /// Whether a password has been chosen yet.
    pub has_password: bool,

    /// When ownership of `email` was confirmed.
    pub email_verified_at: Option<Timestamp>,

    /// Account creation timestamp.
    pub created_at: Timestamp,

    /// Last update timestamp.
    pub updated_at: Timestamp,
}

impl AccountRecord {
    #[must_use]
    pub fn is_verified(&self) -> bool {
        self.email_verified_at.is_some()
    }
}

/// Account together with its stored password hash, for sign in only.
#[derive(Debug, Clone)]
pub(crate) struct AccountCredentials {
    pub account: AccountRecord,
    pub password_hash: Option<String>,
}
