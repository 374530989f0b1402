//! Email Config

use clap::Args;

use scoutline_app::domain::email::HttpEmailConfig;

/// Transactional email settings.
#[derive(Debug, Args)]
pub struct EmailConfig {
    /// Provider endpoint; messages are only logged when unset
    #[arg(long, env = "EMAIL_API_URL")]
    pub email_api_url: Option<String>,

    /// Provider bearer key
    #[arg(long, env = "EMAIL_API_KEY", hide_env_values = true, default_value = "")]
    pub email_api_key: String,

    /// Sender address
    #[arg(
        long,
        env = "EMAIL_FROM",
        default_value = "ScoutLine <no-reply@scoutline.app>"
    )]
    pub email_from: String,
}

impl EmailConfig {
    #[must_use]
    pub fn http_config(&self) -> Option<HttpEmailConfig> {
        let url = self.email_api_url.as_ref()?.trim();

        if url.is_empty() {
            return None;
        }

        Some(HttpEmailConfig {
            url: url.to_string(),
            api_key: self.email_api_key.clone(),
            from: self.email_from.clone(),
        })
    }
}
