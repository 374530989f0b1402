//! Account Handlers

pub(crate) mod create;
pub(crate) mod resend;
pub(crate) mod set_password;
pub(crate) mod verify;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use scoutline_app::domain::accounts::records::AccountRecord;

/// Account Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AccountResponse {
    /// Account identifier
    pub uuid: Uuid,

    /// Normalized sign in address
    pub email: String,

    /// Whether the address has been confirmed
    pub email_verified: bool,
}

impl From<AccountRecord> for AccountResponse {
    fn from(account: AccountRecord) -> Self {
        AccountResponse {
            email_verified: account.is_verified(),
            uuid: account.uuid.into_uuid(),
            email: account.email,
        }
    }
}

/// Request carrying only the token from an emailed link.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TokenRequest {
    pub token: String,
}

/// Request carrying an emailed link token and a new password.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TokenPasswordRequest {
    pub token: String,
    pub password: String,
}

/// Request naming an email address.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EmailRequest {
    pub email: String,
}
