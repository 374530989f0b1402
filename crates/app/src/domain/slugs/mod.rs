//! Slugs
//!
//! Public profile paths are derived from display names and must be unique.

mod allocator;
mod errors;
mod normalize;

pub use allocator::*;
pub use errors::SlugError;
pub use normalize::{FALLBACK_SLUG, MAX_BASE_LEN, normalize};
