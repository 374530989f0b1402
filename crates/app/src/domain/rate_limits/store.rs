//! Hit counters.

use std::{
    sync::Mutex,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use rustc_hash::FxHashMap;

/// Entries kept before expired windows are swept.
const SWEEP_THRESHOLD: usize = 10_000;

/// State of a key's window after recording a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowHit {
    /// Hits in the current window, this one included.
    pub count: u32,

    /// Time until the window resets.
    pub resets_in: Duration,
}

#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Record one hit for `key` in a fixed window of length `window`.
    async fn hit(&self, key: &str, window: Duration, now: Instant) -> WindowHit;
}

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    started: Instant,
}

/// Process-local store. Each instance counts on its own.
#[derive(Debug, Default)]
pub struct InMemoryRateLimitStore {
    windows: Mutex<FxHashMap<String, Window>>,
}

impl InMemoryRateLimitStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RateLimitStore for InMemoryRateLimitStore {
    async fn hit(&self, key: &str, window: Duration, now: Instant) -> WindowHit {
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        if windows.len() >= SWEEP_THRESHOLD {
            windows.retain(|_, entry| now.saturating_duration_since(entry.started) < window);
        }

        let entry = windows.entry(key.to_string()).or_insert(Window {
            count: 0,
            started: now,
        });

        let elapsed = now.saturating_duration_since(entry.started);

        if elapsed >= window {
            *entry = Window {
                count: 0,
                started: now,
            };
        }

        entry.count = entry.count.saturating_add(1);

        WindowHit {
            count: entry.count,
            resets_in: window.saturating_sub(now.saturating_duration_since(entry.started)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn counts_hits_per_key_within_a_window() {
        let store = InMemoryRateLimitStore::new();
        let window = Duration::from_secs(60);
        let start = Instant::now();

        assert_eq!(store.hit("a", window, start).await.count, 1);
        assert_eq!(store.hit("a", window, start).await.count, 2);
        assert_eq!(store.hit("b", window, start).await.count, 1, "keys are independent");

        let later = store.hit("a", window, start + Duration::from_secs(20)).await;

        assert_eq!(later.count, 3);
        assert_eq!(later.resets_in, Duration::from_secs(40));
    }

    #[tokio::test]
    async fn window_resets_after_it_elapses() {
        let store = InMemoryRateLimitStore::new();
        let window = Duration::from_secs(60);
        let start = Instant::now();

        store.hit("a", window, start).await;
        store.hit("a", window, start).await;

        let fresh = store.hit("a", window, start + window).await;

        assert_eq!(fresh.count, 1);
        assert_eq!(fresh.resets_in, window);
    }
}
