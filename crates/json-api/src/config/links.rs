//! Links Config

use clap::Args;

/// Emailed link settings.
#[derive(Debug, Args)]
pub struct LinksConfig {
    /// Public site origin that verification and reset links point at
    #[arg(long, env = "PUBLIC_BASE_URL")]
    pub public_base_url: String,
}
