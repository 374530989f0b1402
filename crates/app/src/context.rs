//! App Context

use std::{path::PathBuf, sync::Arc};

use jiff::SignedDuration;
use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        accounts::{AccountsService, PgAccountsService},
        email::{EmailSender, HttpEmailConfig, HttpEmailSender, LinkBuilder, LogEmailSender},
        photos::LocalPhotoStorage,
        profiles::{PgProfilesService, ProfilesService},
        rate_limits::{InMemoryRateLimitStore, RateLimitPolicy, RateLimiter},
        sessions::{PgSessionsService, SessionsService},
        slugs::SlugAllocator,
        tokens::{SigningSecret, TokenCodec, TokenIssuer, TokenTtls},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Everything needed to wire the services together.
#[derive(Debug)]
pub struct AppSettings {
    pub database_url: String,
    pub signing_secret: SigningSecret,
    pub token_ttls: TokenTtls,
    pub session_ttl: SignedDuration,
    pub public_base_url: String,

    /// Transactional email API; `None` logs messages instead of sending them.
    pub email: Option<HttpEmailConfig>,

    pub photo_storage_dir: PathBuf,
    pub photo_public_base_url: String,
    pub rate_limit: RateLimitPolicy,
}

#[derive(Clone)]
pub struct AppContext {
    pub accounts: Arc<dyn AccountsService>,
    pub sessions: Arc<dyn SessionsService>,
    pub profiles: Arc<dyn ProfilesService>,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppContext {
    /// Build application context from settings.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_settings(settings: AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect(&settings.database_url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool.clone());
        let secret = Arc::new(settings.signing_secret);
        let issuer = TokenIssuer::new(TokenCodec::new(Arc::clone(&secret)), settings.token_ttls);

        let email: Arc<dyn EmailSender> = match settings.email {
            Some(config) => Arc::new(HttpEmailSender::new(config)),
            None => {
                tracing::warn!("no email provider configured, account emails will only be logged");
                Arc::new(LogEmailSender)
            }
        };

        let photos = LocalPhotoStorage::new(
            settings.photo_storage_dir,
            &settings.photo_public_base_url,
        );

        Ok(Self {
            accounts: Arc::new(PgAccountsService::new(
                db.clone(),
                issuer,
                email,
                LinkBuilder::new(&settings.public_base_url),
            )),
            sessions: Arc::new(PgSessionsService::new(pool, secret, settings.session_ttl)),
            profiles: Arc::new(PgProfilesService::new(
                db,
                SlugAllocator::default(),
                Arc::new(photos),
            )),
            rate_limiter: Arc::new(RateLimiter::new(
                Arc::new(InMemoryRateLimitStore::new()),
                settings.rate_limit,
            )),
        })
    }
}
