//! Server-held signing secret.

use std::{fmt, str::FromStr};

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{RngCore, rngs::OsRng};
use thiserror::Error;
use zeroize::Zeroize;

/// Minimum accepted secret length in bytes.
pub const MIN_SIGNING_SECRET_BYTES: usize = 32;

const GENERATED_SECRET_BYTES: usize = 48;

#[derive(Clone)]
pub struct SigningSecret {
    bytes: Vec<u8>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SigningSecretError {
    #[error("signing secret must be at least {min} bytes, got {actual}")]
    TooShort { min: usize, actual: usize },
}

impl SigningSecret {
    /// Wrap raw key material.
    ///
    /// # Errors
    ///
    /// Returns an error when fewer than [`MIN_SIGNING_SECRET_BYTES`] bytes are given.
    pub fn new(mut bytes: Vec<u8>) -> Result<Self, SigningSecretError> {
        if bytes.len() < MIN_SIGNING_SECRET_BYTES {
            let actual = bytes.len();
            bytes.zeroize();

            return Err(SigningSecretError::TooShort {
                min: MIN_SIGNING_SECRET_BYTES,
                actual,
            });
        }

        Ok(Self { bytes })
    }

    /// Generate a random secret in the text form accepted by [`FromStr`].
    #[must_use]
    pub fn generate_encoded() -> String {
        let mut bytes = [0_u8; GENERATED_SECRET_BYTES];

        OsRng.fill_bytes(&mut bytes);

        let encoded = URL_SAFE_NO_PAD.encode(bytes);

        bytes.zeroize();

        encoded
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl FromStr for SigningSecret {
    type Err = SigningSecretError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::new(value.as_bytes().to_vec())
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(**redacted**)")
    }
}

impl Drop for SigningSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn rejects_short_secrets() {
        let result = "too-short".parse::<SigningSecret>();

        assert_eq!(
            result.err(),
            Some(SigningSecretError::TooShort {
                min: MIN_SIGNING_SECRET_BYTES,
                actual: 9
            })
        );
    }

    #[test]
    fn generated_secrets_are_accepted() -> TestResult {
        let secret = SigningSecret::generate_encoded().parse::<SigningSecret>()?;

        assert!(secret.as_bytes().len() >= MIN_SIGNING_SECRET_BYTES);

        Ok(())
    }

    #[test]
    fn debug_output_is_redacted() -> TestResult {
        let secret = "0123456789abcdef0123456789abcdef".parse::<SigningSecret>()?;

        assert_eq!(format!("{secret:?}"), "SigningSecret(**redacted**)");

        Ok(())
    }
}
