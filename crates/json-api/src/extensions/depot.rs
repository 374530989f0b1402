//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use scoutline_app::domain::accounts::records::AccountUuid;

const ACCOUNT_UUID_KEY: &str = "account_uuid";
const BEARER_TOKEN_KEY: &str = "bearer_token";

/// Typed access to values the middleware stack leaves in the depot.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_account_uuid(&mut self, account: AccountUuid);

    fn account_uuid_or_401(&self) -> Result<AccountUuid, StatusError>;

    fn insert_bearer_token(&mut self, token: String);

    fn bearer_token_or_401(&self) -> Result<&str, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_account_uuid(&mut self, account: AccountUuid) {
        self.insert(ACCOUNT_UUID_KEY, account);
    }

    fn account_uuid_or_401(&self) -> Result<AccountUuid, StatusError> {
        self.get::<AccountUuid>(ACCOUNT_UUID_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }

    fn insert_bearer_token(&mut self, token: String) {
        self.insert(BEARER_TOKEN_KEY, token);
    }

    fn bearer_token_or_401(&self) -> Result<&str, StatusError> {
        self.get::<String>(BEARER_TOKEN_KEY)
            .map(String::as_str)
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
