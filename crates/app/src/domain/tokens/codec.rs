//! Compact token encoding: `base64url(json claims) "." base64url(hmac-sha256)`.
//!
//! The signature covers the encoded payload segment exactly as transmitted.

use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::domain::tokens::{SigningSecret, TokenClaims, TokenError};

type HmacSha256 = Hmac<Sha256>;

const SEPARATOR: char = '.';

#[derive(Debug, Clone)]
pub struct TokenCodec {
    secret: Arc<SigningSecret>,
}

impl TokenCodec {
    #[must_use]
    pub fn new(secret: Arc<SigningSecret>) -> Self {
        Self { secret }
    }

    /// Serialize and sign `claims`.
    ///
    /// # Errors
    ///
    /// Returns an error if the claims cannot be serialized.
    pub fn seal(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        let payload = serde_json::to_vec(claims).map_err(TokenError::Encode)?;
        let payload = URL_SAFE_NO_PAD.encode(payload);

        let signature = self
            .mac()?
            .chain_update(payload.as_bytes())
            .finalize()
            .into_bytes();

        Ok(format!(
            "{payload}{SEPARATOR}{}",
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    /// Check the signature of `token` and decode its claims.
    ///
    /// Purpose and expiry are not checked here.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Malformed`] unless the token is exactly two
    /// non-empty segments, and [`TokenError::InvalidSignature`] when the
    /// signature does not match or the payload cannot be decoded.
    pub fn open(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut segments = token.split(SEPARATOR);

        let (Some(payload), Some(signature), None) =
            (segments.next(), segments.next(), segments.next())
        else {
            return Err(TokenError::Malformed);
        };

        if payload.is_empty() || signature.is_empty() {
            return Err(TokenError::Malformed);
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_ignored| TokenError::InvalidSignature)?;

        // `verify_slice` compares in constant time.
        self.mac()?
            .chain_update(payload.as_bytes())
            .verify_slice(&signature)
            .map_err(|_ignored| TokenError::InvalidSignature)?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_ignored| TokenError::InvalidSignature)?;

        serde_json::from_slice(&payload).map_err(|_ignored| TokenError::InvalidSignature)
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        HmacSha256::new_from_slice(self.secret.as_bytes()).map_err(TokenError::SigningKey)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::domain::tokens::TokenPurpose;

    use super::*;

    fn codec(secret: &str) -> Result<TokenCodec, Box<dyn std::error::Error>> {
        Ok(TokenCodec::new(Arc::new(secret.parse()?)))
    }

    fn claims() -> TokenClaims {
        TokenClaims {
            subject: "coach@example.com".to_string(),
            purpose: TokenPurpose::EmailVerify,
            issued_at: 1_700_000_000,
            expires_at: 1_700_001_800,
            token_id: Uuid::nil(),
        }
    }

    const SECRET: &str = "a-test-signing-secret-that-is-long-enough";

    #[test]
    fn sealed_token_opens_to_the_same_claims() -> TestResult {
        let codec = codec(SECRET)?;
        let token = codec.seal(&claims())?;

        assert_eq!(token.matches('.').count(), 1, "exactly one separator");
        assert_eq!(codec.open(&token)?, claims());

        Ok(())
    }

    #[test]
    fn payload_uses_camel_case_keys() -> TestResult {
        let token = codec(SECRET)?.seal(&claims())?;
        let payload = token.split('.').next().unwrap_or_default();
        let json: serde_json::Value = serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload)?)?;

        assert_eq!(json["subject"], "coach@example.com");
        assert_eq!(json["purpose"], "email-verify");
        assert_eq!(json["issuedAt"], 1_700_000_000);
        assert_eq!(json["expiresAt"], 1_700_001_800);

        Ok(())
    }

    #[test]
    fn rejects_tokens_without_two_non_empty_segments() -> TestResult {
        let codec = codec(SECRET)?;

        for token in ["", "abc", ".sig", "payload.", "a.b.c", "."] {
            assert!(
                matches!(codec.open(token), Err(TokenError::Malformed)),
                "{token:?} should be malformed"
            );
        }

        Ok(())
    }

    #[test]
    fn mutating_any_signature_character_fails() -> TestResult {
        let codec = codec(SECRET)?;
        let token = codec.seal(&claims())?;
        let (payload, signature) = token.split_once('.').unwrap_or_default();

        for index in 0..signature.len() {
            let tampered: String = signature
                .chars()
                .enumerate()
                .map(|(position, c)| match (position == index, c) {
                    (true, 'A') => 'B',
                    (true, _) => 'A',
                    (false, c) => c,
                })
                .collect();

            let result = codec.open(&format!("{payload}.{tampered}"));

            assert!(
                matches!(result, Err(TokenError::InvalidSignature)),
                "tampering position {index} should fail, got {result:?}"
            );
        }

        Ok(())
    }

    #[test]
    fn rejects_tokens_signed_with_another_secret() -> TestResult {
        let token = codec("another-secret-that-is-also-long-enough!")?.seal(&claims())?;

        assert!(matches!(
            codec(SECRET)?.open(&token),
            Err(TokenError::InvalidSignature)
        ));

        Ok(())
    }

    #[test]
    fn rejects_validly_signed_garbage_payload() -> TestResult {
        let codec = codec(SECRET)?;
        let payload = URL_SAFE_NO_PAD.encode(b"not json");
        let signature = codec
            .mac()?
            .chain_update(payload.as_bytes())
            .finalize()
            .into_bytes();
        let token = format!("{payload}.{}", URL_SAFE_NO_PAD.encode(signature));

        assert!(matches!(
            codec.open(&token),
            Err(TokenError::InvalidSignature)
        ));

        Ok(())
    }
}
