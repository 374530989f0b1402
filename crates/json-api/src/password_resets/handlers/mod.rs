//! Password Reset Handlers
//!
//! Errors share the account mapping: every rejected link reads the same.

pub(crate) mod confirm;
pub(crate) mod create;
