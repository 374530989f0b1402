//! Token payload.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::tokens::TokenPurpose;

/// Claims carried inside a signed token.
///
/// Times are whole seconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    pub subject: String,
    pub purpose: TokenPurpose,
    pub issued_at: i64,
    pub expires_at: i64,
    pub token_id: Uuid,
}

impl TokenClaims {
    /// A token is still valid at exactly `expires_at`.
    #[must_use]
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now.as_second() > self.expires_at
    }
}
