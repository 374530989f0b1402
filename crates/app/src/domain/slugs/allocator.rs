//! Unique slug allocation.
//!
//! Candidates are `base`, `base-2`, `base-3`, ... probed strictly in order.

use async_trait::async_trait;

use crate::domain::slugs::{FALLBACK_SLUG, SlugError, normalize};

/// Longest slug ever produced, suffix included.
pub const MAX_SLUG_LEN: usize = 64;

/// Default bound on candidates tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Existence check against the backing store.
#[async_trait]
pub trait SlugLookup: Send {
    async fn slug_exists(&mut self, slug: &str) -> Result<bool, SlugError>;
}

/// Outcome of trying to write a slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugClaim<T> {
    Claimed(T),

    /// The write hit the unique constraint; someone else holds the slug.
    Taken,
}

/// A store that can atomically take ownership of a slug.
#[async_trait]
pub trait SlugStore: SlugLookup {
    type Claimed: Send;

    async fn claim(&mut self, slug: &str) -> Result<SlugClaim<Self::Claimed>, SlugError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlugAllocator {
    max_len: usize,
    max_attempts: u32,
}

impl Default for SlugAllocator {
    fn default() -> Self {
        Self {
            max_len: MAX_SLUG_LEN,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl SlugAllocator {
    /// `max_len` is raised when needed so the longest suffix still leaves
    /// room for one character of the base.
    #[must_use]
    pub fn new(max_len: usize, max_attempts: u32) -> Self {
        let longest_suffix = format!("-{max_attempts}").len();

        Self {
            max_len: max_len.max(longest_suffix + 1),
            max_attempts,
        }
    }

    /// The slug tried on the given 1-based attempt.
    ///
    /// `base` is expected to come from [`normalize`]. It is shortened when
    /// needed so the suffix always fits.
    #[must_use]
    pub fn candidate(&self, base: &str, attempt: u32) -> String {
        let suffix = if attempt <= 1 {
            String::new()
        } else {
            format!("-{attempt}")
        };

        let keep = self.max_len.saturating_sub(suffix.len());
        let mut head: String = base.chars().take(keep).collect();

        while head.ends_with('-') {
            head.pop();
        }

        if head.is_empty() {
            head = FALLBACK_SLUG.chars().take(keep).collect();
        }

        head + &suffix
    }

    /// First candidate for `base` the lookup reports as free. The base is
    /// normalized first, so raw display names are accepted too.
    ///
    /// # Errors
    ///
    /// Returns [`SlugError::Exhausted`] once every allowed candidate is taken.
    pub async fn allocate_unique<L>(&self, base: &str, lookup: &mut L) -> Result<String, SlugError>
    where
        L: SlugLookup + ?Sized,
    {
        let base = normalize(base);

        for attempt in 1..=self.max_attempts {
            let candidate = self.candidate(&base, attempt);

            if !lookup.slug_exists(&candidate).await? {
                return Ok(candidate);
            }
        }

        Err(SlugError::Exhausted {
            attempts: self.max_attempts,
        })
    }

    /// Like [`SlugAllocator::allocate_unique`], but also writes the slug.
    ///
    /// A free-looking candidate can still be taken by a concurrent writer
    /// before the claim lands; that candidate is skipped and probing carries on.
    ///
    /// # Errors
    ///
    /// Returns [`SlugError::Exhausted`] once every allowed candidate is taken.
    pub async fn claim_unique<S>(&self, base: &str, store: &mut S) -> Result<S::Claimed, SlugError>
    where
        S: SlugStore + ?Sized,
    {
        let base = normalize(base);

        for attempt in 1..=self.max_attempts {
            let candidate = self.candidate(&base, attempt);

            if store.slug_exists(&candidate).await? {
                continue;
            }

            match store.claim(&candidate).await? {
                SlugClaim::Claimed(claimed) => return Ok(claimed),
                SlugClaim::Taken => {
                    tracing::debug!(slug = %candidate, "slug taken concurrently, retrying");
                }
            }
        }

        Err(SlugError::Exhausted {
            attempts: self.max_attempts,
        })
    }
}
