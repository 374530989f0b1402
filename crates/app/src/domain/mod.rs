//! ScoutLine Domain Concerns

pub mod accounts;
pub mod email;
pub mod password_resets;
pub mod photos;
pub mod profiles;
pub mod rate_limits;
pub mod sessions;
pub mod slugs;
pub mod tokens;
