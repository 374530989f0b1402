//! Photo Storage Config

use std::path::PathBuf;

use clap::Args;

/// Profile photo storage settings.
#[derive(Debug, Args)]
pub struct PhotoStorageConfig {
    /// Directory uploaded photos are written to
    #[arg(long, env = "PHOTO_STORAGE_DIR", default_value = "./photos")]
    pub photo_storage_dir: PathBuf,

    /// Public URL prefix the storage directory is served from
    #[arg(
        long,
        env = "PHOTO_PUBLIC_BASE_URL",
        default_value = "http://localhost:8698/photos"
    )]
    pub photo_public_base_url: String,
}
