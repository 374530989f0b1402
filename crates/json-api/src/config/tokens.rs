//! Token Config

use clap::Args;
use jiff::SignedDuration;

use scoutline_app::domain::tokens::{SigningSecret, TokenTtls};

/// Link token and session lifetimes.
#[derive(Debug, Args)]
pub struct TokensConfig {
    /// HMAC key for link tokens and session verifiers, at least 32 bytes
    #[arg(long, env = "TOKEN_SIGNING_SECRET", hide_env_values = true)]
    pub signing_secret: SigningSecret,

    /// Lifetime of email verification links
    #[arg(long, env = "EMAIL_VERIFY_TTL_MINUTES", default_value_t = 30)]
    pub email_verify_ttl_minutes: u32,

    /// Lifetime of password reset links
    #[arg(long, env = "PASSWORD_RESET_TTL_MINUTES", default_value_t = 60)]
    pub password_reset_ttl_minutes: u32,

    /// Lifetime of set-password links
    #[arg(long, env = "SET_PASSWORD_TTL_MINUTES", default_value_t = 1440)]
    pub set_password_ttl_minutes: u32,

    /// Lifetime of sign in sessions
    #[arg(long, env = "SESSION_TTL_DAYS", default_value_t = 30)]
    pub session_ttl_days: u32,
}

impl TokensConfig {
    #[must_use]
    pub fn token_ttls(&self) -> TokenTtls {
        TokenTtls {
            email_verify: minutes(self.email_verify_ttl_minutes),
            password_reset: minutes(self.password_reset_ttl_minutes),
            set_password: minutes(self.set_password_ttl_minutes),
        }
    }

    #[must_use]
    pub fn session_ttl(&self) -> SignedDuration {
        SignedDuration::from_hours(i64::from(self.session_ttl_days) * 24)
    }
}

fn minutes(value: u32) -> SignedDuration {
    SignedDuration::from_mins(i64::from(value))
}
