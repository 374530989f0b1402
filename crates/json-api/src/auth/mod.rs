//! Authentication
//!
//! Bearer session middleware for account scoped routes.

pub(crate) mod middleware;
