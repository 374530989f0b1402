//! Server configuration module

use clap::Parser;

use scoutline_app::context::AppSettings;

use crate::config::{
    db::DatabaseConfig,
    email::EmailConfig,
    links::LinksConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    rate_limit::RateLimitConfig,
    server::ServerRuntimeConfig,
    storage::PhotoStorageConfig,
    tokens::TokensConfig,
};

pub(crate) mod db;
pub(crate) mod email;
pub(crate) mod links;
pub(crate) mod observability;
pub(crate) mod rate_limit;
pub(crate) mod server;
pub(crate) mod storage;
pub(crate) mod tokens;

/// ScoutLine JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "scoutline-json", about = "ScoutLine JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Link token and session settings.
    #[command(flatten)]
    pub tokens: TokensConfig,

    /// Where emailed links point.
    #[command(flatten)]
    pub links: LinksConfig,

    /// Transactional email settings.
    #[command(flatten)]
    pub email: EmailConfig,

    /// Profile photo storage settings.
    #[command(flatten)]
    pub photos: PhotoStorageConfig,

    /// Abuse protection for credential endpoints.
    #[command(flatten)]
    pub rate_limit: RateLimitConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings for wiring the application services.
    #[must_use]
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            database_url: self.database.database_url.clone(),
            signing_secret: self.tokens.signing_secret.clone(),
            token_ttls: self.tokens.token_ttls(),
            session_ttl: self.tokens.session_ttl(),
            public_base_url: self.links.public_base_url.clone(),
            email: self.email.http_config(),
            photo_storage_dir: self.photos.photo_storage_dir.clone(),
            photo_public_base_url: self.photos.photo_public_base_url.clone(),
            rate_limit: self.rate_limit.policy(),
        }
    }
}
