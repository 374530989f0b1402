//! Profiles Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgConnection, Postgres, Row, postgres::PgRow, query_as, query_scalar};

use crate::domain::{
    accounts::records::AccountUuid,
    profiles::{
        data::ProfileUpdate,
        records::{ProfileRecord, ProfileUuid},
    },
};

/// Unique constraint guarding `profiles.slug`.
pub(crate) const SLUG_CONSTRAINT: &str = "profiles_slug_key";

const FIND_PROFILE_BY_ACCOUNT_SQL: &str = include_str!("sql/find_profile_by_account.sql");
const FIND_PROFILE_BY_SLUG_SQL: &str = include_str!("sql/find_profile_by_slug.sql");
const SLUG_TAKEN_SQL: &str = include_str!("sql/slug_taken.sql");
const UPSERT_PROFILE_SQL: &str = include_str!("sql/upsert_profile.sql");
const SET_PROFILE_PHOTO_URL_SQL: &str = include_str!("sql/set_profile_photo_url.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProfilesRepository;

impl PgProfilesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_by_account(
        &self,
        conn: &mut PgConnection,
        account: AccountUuid,
    ) -> Result<Option<ProfileRecord>, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(FIND_PROFILE_BY_ACCOUNT_SQL)
            .bind(account.into_uuid())
            .fetch_optional(conn)
            .await
    }

    pub(crate) async fn find_by_slug(
        &self,
        conn: &mut PgConnection,
        slug: &str,
    ) -> Result<Option<ProfileRecord>, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(FIND_PROFILE_BY_SLUG_SQL)
            .bind(slug)
            .fetch_optional(conn)
            .await
    }

    /// Whether a profile other than `account`'s holds `slug`.
    pub(crate) async fn slug_taken(
        &self,
        conn: &mut PgConnection,
        slug: &str,
        account: AccountUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(SLUG_TAKEN_SQL)
            .bind(slug)
            .bind(account.into_uuid())
            .fetch_one(conn)
            .await
    }

    pub(crate) async fn upsert_profile(
        &self,
        conn: &mut PgConnection,
        uuid: ProfileUuid,
        account: AccountUuid,
        update: &ProfileUpdate,
        slug: &str,
    ) -> Result<ProfileRecord, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(UPSERT_PROFILE_SQL)
            .bind(uuid.into_uuid())
            .bind(account.into_uuid())
            .bind(&update.display_name)
            .bind(slug)
            .bind(update.headline.as_deref())
            .bind(update.organization.as_deref())
            .bind(update.bio.as_deref())
            .fetch_one(conn)
            .await
    }

    pub(crate) async fn set_photo_url(
        &self,
        conn: &mut PgConnection,
        account: AccountUuid,
        photo_url: &str,
    ) -> Result<ProfileRecord, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(SET_PROFILE_PHOTO_URL_SQL)
            .bind(account.into_uuid())
            .bind(photo_url)
            .fetch_one(conn)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProfileRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProfileUuid::from_uuid(row.try_get("uuid")?),
            account_uuid: AccountUuid::from_uuid(row.try_get("account_uuid")?),
            display_name: row.try_get("display_name")?,
            slug: row.try_get("slug")?,
            headline: row.try_get("headline")?,
            organization: row.try_get("organization")?,
            bio: row.try_get("bio")?,
            photo_url: row.try_get("photo_url")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
