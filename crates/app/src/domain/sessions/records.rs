//! Session Records

use jiff::Timestamp;

use crate::{
    domain::{accounts::records::AccountUuid, sessions::SessionTokenVersion},
    uuids::typed_uuid,
};

typed_uuid!(
    /// Session UUID
    SessionUuid
);

/// Session metadata. The verifier hash never leaves the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub uuid: SessionUuid,
    pub account_uuid: AccountUuid,
    pub version: SessionTokenVersion,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
}

/// Session verifier data needed during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveSession {
    pub account_uuid: AccountUuid,
    pub version: SessionTokenVersion,
    pub token_hash: String,
}

/// New session persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewSession {
    pub uuid: SessionUuid,
    pub account_uuid: AccountUuid,
    pub version: SessionTokenVersion,
    pub token_hash: String,
    pub expires_at: Timestamp,
}

/// A session with its one-time raw bearer token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub session: SessionRecord,
}
