//! Display name to slug base.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Longest base produced by [`normalize`], leaving room for a numeric suffix.
pub const MAX_BASE_LEN: usize = 48;

/// Base used when a name has no usable characters.
pub const FALLBACK_SLUG: &str = "coach";

/// Derive a URL-safe slug base from a display name.
///
/// Diacritics are stripped, every run of other characters becomes a single
/// hyphen, and the result never starts or ends with a hyphen.
#[must_use]
pub fn normalize(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.nfkd().filter(|ch| !is_combining_mark(*ch)) {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }

            slug.push(ch.to_ascii_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }

    // ASCII only from here on, so byte truncation is safe.
    slug.truncate(MAX_BASE_LEN);

    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}
