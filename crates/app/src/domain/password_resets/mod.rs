//! Password Resets

pub mod records;
pub(crate) mod repository;
pub mod service;

use sha2::{Digest, Sha256};

pub use service::*;

/// Lookup key stored for a reset token: lowercase hex SHA-256 of the token text.
#[must_use]
pub fn token_hash(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
