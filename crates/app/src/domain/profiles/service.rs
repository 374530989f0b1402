//! Profiles service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Connection, PgConnection};

use crate::{
    database::{Db, is_unique_violation},
    domain::{
        accounts::records::AccountUuid,
        photos::{PhotoStorage, PhotoUpload},
        profiles::{
            data::ProfileUpdate,
            errors::ProfilesServiceError,
            records::{ProfileRecord, ProfileUuid},
            repository::{PgProfilesRepository, SLUG_CONSTRAINT},
        },
        slugs::{self, SlugAllocator, SlugClaim, SlugError, SlugLookup, SlugStore},
    },
};

/// Slug probing and claiming for one profile write, inside its transaction.
struct ProfileSlugStore<'a> {
    repository: &'a PgProfilesRepository,
    conn: &'a mut PgConnection,
    profile: ProfileUuid,
    account: AccountUuid,
    update: &'a ProfileUpdate,
}

#[async_trait]
impl<'a> SlugLookup for ProfileSlugStore<'a> {
    async fn slug_exists(&mut self, slug: &str) -> Result<bool, SlugError> {
        Ok(self
            .repository
            .slug_taken(&mut *self.conn, slug, self.account)
            .await?)
    }
}

#[async_trait]
impl<'a> SlugStore for ProfileSlugStore<'a> {
    type Claimed = ProfileRecord;

    async fn claim(&mut self, slug: &str) -> Result<SlugClaim<ProfileRecord>, SlugError> {
        // A unique violation aborts the enclosing transaction, so each attempt
        // runs in its own savepoint.
        let mut savepoint = Connection::begin(&mut *self.conn).await?;

        let written = self
            .repository
            .upsert_profile(
                &mut savepoint,
                self.profile,
                self.account,
                self.update,
                slug,
            )
            .await;

        match written {
            Ok(profile) => {
                savepoint.commit().await?;

                Ok(SlugClaim::Claimed(profile))
            }
            Err(error) if is_unique_violation(&error, SLUG_CONSTRAINT) => {
                savepoint.rollback().await?;

                Ok(SlugClaim::Taken)
            }
            Err(error) => Err(error.into()),
        }
    }
}

#[derive(Clone)]
pub struct PgProfilesService {
    db: Db,
    repository: PgProfilesRepository,
    allocator: SlugAllocator,
    photos: Arc<dyn PhotoStorage>,
}

impl PgProfilesService {
    #[must_use]
    pub fn new(db: Db, allocator: SlugAllocator, photos: Arc<dyn PhotoStorage>) -> Self {
        Self {
            db,
            repository: PgProfilesRepository::new(),
            allocator,
            photos,
        }
    }
}

impl fmt::Debug for PgProfilesService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgProfilesService")
            .field("allocator", &self.allocator)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ProfilesService for PgProfilesService {
    async fn save_profile(
        &self,
        account: AccountUuid,
        update: ProfileUpdate,
    ) -> Result<ProfileRecord, ProfilesServiceError> {
        let update = update.normalized()?;
        let mut tx = self.db.begin().await?;

        let existing = self.repository.find_by_account(&mut tx, account).await?;

        let profile = match existing {
            Some(current) if current.display_name == update.display_name => {
                self.repository
                    .upsert_profile(&mut tx, current.uuid, account, &update, &current.slug)
                    .await?
            }
            existing => {
                let base = slugs::normalize(&update.display_name);

                let mut store = ProfileSlugStore {
                    repository: &self.repository,
                    conn: &mut tx,
                    profile: existing.map_or_else(ProfileUuid::new, |current| current.uuid),
                    account,
                    update: &update,
                };

                match self.allocator.claim_unique(&base, &mut store).await {
                    Ok(profile) => profile,
                    Err(SlugError::Exhausted { attempts }) => {
                        tracing::warn!(%account, %base, attempts, "slug allocation exhausted");

                        return Err(ProfilesServiceError::SlugUnavailable);
                    }
                    Err(error) => return Err(error.into()),
                }
            }
        };

        tx.commit().await?;

        tracing::info!(%account, slug = %profile.slug, "profile saved");

        Ok(profile)
    }

    async fn get_profile(&self, account: AccountUuid) -> Result<ProfileRecord, ProfilesServiceError> {
        let mut conn = self.db.pool().acquire().await?;

        self.repository
            .find_by_account(&mut conn, account)
            .await?
            .ok_or(ProfilesServiceError::NotFound)
    }

    async fn get_by_slug(&self, slug: &str) -> Result<ProfileRecord, ProfilesServiceError> {
        let mut conn = self.db.pool().acquire().await?;

        self.repository
            .find_by_slug(&mut conn, slug)
            .await?
            .ok_or(ProfilesServiceError::NotFound)
    }

    async fn set_photo(
        &self,
        account: AccountUuid,
        upload: PhotoUpload,
    ) -> Result<ProfileRecord, ProfilesServiceError> {
        let mut conn = self.db.pool().acquire().await?;

        if self
            .repository
            .find_by_account(&mut conn, account)
            .await?
            .is_none()
        {
            return Err(ProfilesServiceError::NotFound);
        }

        drop(conn);

        let path = upload.path_for(account);
        let content_type = upload.format.content_type();
        let url = self.photos.store(upload.bytes, content_type, &path).await?;

        let mut conn = self.db.pool().acquire().await?;
        let profile = self.repository.set_photo_url(&mut conn, account, &url).await?;

        tracing::info!(%account, %url, "profile photo updated");

        Ok(profile)
    }
}

#[automock]
#[async_trait]
pub trait ProfilesService: Send + Sync {
    /// Create or update the profile of `account`, allocating a slug from the
    /// display name when it is new or has changed.
    async fn save_profile(
        &self,
        account: AccountUuid,
        update: ProfileUpdate,
    ) -> Result<ProfileRecord, ProfilesServiceError>;

    async fn get_profile(&self, account: AccountUuid) -> Result<ProfileRecord, ProfilesServiceError>;

    /// Public lookup by slug.
    async fn get_by_slug(&self, slug: &str) -> Result<ProfileRecord, ProfilesServiceError>;

    /// Store a validated photo and point the profile at it.
    async fn set_photo(
        &self,
        account: AccountUuid,
        upload: PhotoUpload,
    ) -> Result<ProfileRecord, ProfilesServiceError>;
}
