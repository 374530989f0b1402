//! Rate Limits
//!
//! Fixed-window hit counting for abuse-prone endpoints.

mod limiter;
mod store;

pub use limiter::{RateLimitError, RateLimitPolicy, RateLimiter};
pub use store::{InMemoryRateLimitStore, RateLimitStore, WindowHit};
