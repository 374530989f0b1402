//! Policy enforcement over a [`RateLimitStore`].

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use thiserror::Error;

use crate::domain::rate_limits::RateLimitStore;

/// At most `max` hits per `window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub max: u32,
    pub window: Duration,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            max: 5,
            window: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateLimitError {
    #[error("rate limit exceeded, retry in {}s", retry_after.as_secs())]
    Exceeded { retry_after: Duration },
}

#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
    policy: RateLimitPolicy,
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl RateLimiter {
    #[must_use]
    pub fn new(store: Arc<dyn RateLimitStore>, policy: RateLimitPolicy) -> Self {
        Self { store, policy }
    }

    #[must_use]
    pub fn policy(&self) -> RateLimitPolicy {
        self.policy
    }

    /// Record a hit for `key` and reject it once the policy is exceeded.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitError::Exceeded`] with the time until the window resets.
    pub async fn check(&self, key: &str) -> Result<(), RateLimitError> {
        self.check_at(key, Instant::now()).await
    }

    /// [`RateLimiter::check`] against an explicit clock.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitError::Exceeded`] with the time until the window resets.
    pub async fn check_at(&self, key: &str, now: Instant) -> Result<(), RateLimitError> {
        let hit = self.store.hit(key, self.policy.window, now).await;

        if hit.count > self.policy.max {
            // Whole seconds, rounded up.
            let retry_after = Duration::from_secs(hit.resets_in.as_secs() + 1);

            return Err(RateLimitError::Exceeded { retry_after });
        }

        Ok(())
    }
}
