//! Rate Limit Config

use std::time::Duration;

use clap::Args;

use scoutline_app::domain::rate_limits::RateLimitPolicy;

/// Per client limits on sign up, sign in and password reset requests.
#[derive(Debug, Args)]
pub struct RateLimitConfig {
    /// Requests allowed per window
    #[arg(long, env = "RATE_LIMIT_MAX", default_value_t = 5)]
    pub rate_limit_max: u32,

    /// Window length in seconds
    #[arg(long, env = "RATE_LIMIT_WINDOW_SECONDS", default_value_t = 60)]
    pub rate_limit_window_seconds: u64,
}

impl RateLimitConfig {
    #[must_use]
    pub fn policy(&self) -> RateLimitPolicy {
        RateLimitPolicy {
            max: self.rate_limit_max,
            window: Duration::from_secs(self.rate_limit_window_seconds),
        }
    }
}
