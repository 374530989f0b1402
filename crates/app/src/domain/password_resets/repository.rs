//! Password Resets Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgConnection, Postgres, Row, postgres::PgRow, query, query_as};

use crate::domain::{
    accounts::records::AccountUuid,
    password_resets::records::{PasswordResetRecord, PasswordResetUuid},
};

const CREATE_PASSWORD_RESET_SQL: &str = include_str!("sql/create_password_reset.sql");
const FIND_BY_TOKEN_HASH_SQL: &str = include_str!("sql/find_password_reset_by_token_hash.sql");
const INVALIDATE_ACTIVE_SQL: &str = include_str!("sql/invalidate_active_password_resets.sql");
const MARK_USED_SQL: &str = include_str!("sql/mark_password_reset_used.sql");
const DELETE_EXPIRED_SQL: &str = include_str!("sql/delete_expired_password_resets.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPasswordResetsRepository;

impl PgPasswordResetsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create(
        &self,
        conn: &mut PgConnection,
        account: AccountUuid,
        token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<PasswordResetRecord, sqlx::Error> {
        query_as::<Postgres, PasswordResetRecord>(CREATE_PASSWORD_RESET_SQL)
            .bind(PasswordResetUuid::new().into_uuid())
            .bind(account.into_uuid())
            .bind(token_hash)
            .bind(SqlxTimestamp::from(expires_at))
            .fetch_one(conn)
            .await
    }

    pub(crate) async fn find_by_token_hash(
        &self,
        conn: &mut PgConnection,
        token_hash: &str,
    ) -> Result<Option<PasswordResetRecord>, sqlx::Error> {
        query_as::<Postgres, PasswordResetRecord>(FIND_BY_TOKEN_HASH_SQL)
            .bind(token_hash)
            .fetch_optional(conn)
            .await
    }

    /// Mark every active record of `account` used. Returns how many were superseded.
    pub(crate) async fn invalidate_active_for_account(
        &self,
        conn: &mut PgConnection,
        account: AccountUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(INVALIDATE_ACTIVE_SQL)
            .bind(account.into_uuid())
            .execute(conn)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Consume the record if it is still active. Zero rows means another
    /// request got there first, or it lapsed.
    pub(crate) async fn mark_used(
        &self,
        conn: &mut PgConnection,
        token_hash: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(MARK_USED_SQL)
            .bind(token_hash)
            .execute(conn)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_expired(
        &self,
        conn: &mut PgConnection,
        before: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_EXPIRED_SQL)
            .bind(SqlxTimestamp::from(before))
            .execute(conn)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for PasswordResetRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PasswordResetUuid::from_uuid(row.try_get("uuid")?),
            account_uuid: AccountUuid::from_uuid(row.try_get("account_uuid")?),
            token_hash: row.try_get("token_hash")?,
            expires_at: row.try_get::<SqlxTimestamp, _>("expires_at")?.to_jiff(),
            used: row.try_get("used")?,
            used_at: row
                .try_get::<Option<SqlxTimestamp>, _>("used_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
