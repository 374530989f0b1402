//! Accounts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgConnection, Postgres, Row, postgres::PgRow, query_as};

use crate::domain::accounts::records::{AccountCredentials, AccountRecord, AccountUuid};

const CREATE_ACCOUNT_SQL: &str = include_str!("sql/create_account.sql");
const FIND_ACCOUNT_BY_EMAIL_SQL: &str = include_str!("sql/find_account_by_email.sql");
const FIND_ACCOUNT_BY_UUID_SQL: &str = include_str!("sql/find_account_by_uuid.sql");
const MARK_EMAIL_VERIFIED_SQL: &str = include_str!("sql/mark_email_verified.sql");
const SET_PASSWORD_HASH_SQL: &str = include_str!("sql/set_password_hash.sql");
const SET_INITIAL_PASSWORD_SQL: &str = include_str!("sql/set_initial_password.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAccountsRepository;

impl PgAccountsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_account(
        &self,
        conn: &mut PgConnection,
        uuid: AccountUuid,
        email: &str,
        password_hash: Option<&str>,
    ) -> Result<AccountRecord, sqlx::Error> {
        query_as::<Postgres, AccountRecord>(CREATE_ACCOUNT_SQL)
            .bind(uuid.into_uuid())
            .bind(email)
            .bind(password_hash)
            .fetch_one(conn)
            .await
    }

    pub(crate) async fn find_by_email(
        &self,
        conn: &mut PgConnection,
        email: &str,
    ) -> Result<Option<AccountCredentials>, sqlx::Error> {
        query_as::<Postgres, AccountCredentials>(FIND_ACCOUNT_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(conn)
            .await
    }

    pub(crate) async fn find_by_uuid(
        &self,
        conn: &mut PgConnection,
        uuid: AccountUuid,
    ) -> Result<AccountRecord, sqlx::Error> {
        query_as::<Postgres, AccountRecord>(FIND_ACCOUNT_BY_UUID_SQL)
            .bind(uuid.into_uuid())
            .fetch_one(conn)
            .await
    }

    pub(crate) async fn mark_email_verified(
        &self,
        conn: &mut PgConnection,
        email: &str,
    ) -> Result<AccountRecord, sqlx::Error> {
        query_as::<Postgres, AccountRecord>(MARK_EMAIL_VERIFIED_SQL)
            .bind(email)
            .fetch_one(conn)
            .await
    }

    pub(crate) async fn set_password_hash(
        &self,
        conn: &mut PgConnection,
        uuid: AccountUuid,
        password_hash: &str,
    ) -> Result<AccountRecord, sqlx::Error> {
        query_as::<Postgres, AccountRecord>(SET_PASSWORD_HASH_SQL)
            .bind(uuid.into_uuid())
            .bind(password_hash)
            .fetch_one(conn)
            .await
    }

    /// Set the password of the account owning `email` and confirm the address,
    /// since receiving the set-password link proves ownership.
    pub(crate) async fn set_initial_password(
        &self,
        conn: &mut PgConnection,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<AccountRecord>, sqlx::Error> {
        query_as::<Postgres, AccountRecord>(SET_INITIAL_PASSWORD_SQL)
            .bind(email)
            .bind(password_hash)
            .fetch_optional(conn)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for AccountRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AccountUuid::from_uuid(row.try_get("uuid")?),
            email: row.try_get("email")?,
            has_password: row.try_get("has_password")?,
            email_verified_at: row
                .try_get::<Option<SqlxTimestamp>, _>("email_verified_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for AccountCredentials {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            account: AccountRecord::from_row(row)?,
            password_hash: row.try_get("password_hash")?,
        })
    }
}
