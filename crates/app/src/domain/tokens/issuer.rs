//! Token issuance.

use jiff::{SignedDuration, Timestamp};
use uuid::Uuid;

use crate::domain::tokens::{TokenClaims, TokenCodec, TokenError, TokenPurpose};

/// Lifetimes applied by [`TokenIssuer::issue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenTtls {
    pub email_verify: SignedDuration,
    pub password_reset: SignedDuration,
    pub set_password: SignedDuration,
}

impl TokenTtls {
    #[must_use]
    pub const fn for_purpose(&self, purpose: TokenPurpose) -> SignedDuration {
        match purpose {
            TokenPurpose::EmailVerify => self.email_verify,
            TokenPurpose::PasswordReset => self.password_reset,
            TokenPurpose::SetPassword => self.set_password,
        }
    }
}

impl Default for TokenTtls {
    fn default() -> Self {
        Self {
            email_verify: SignedDuration::from_mins(30),
            password_reset: SignedDuration::from_hours(1),
            set_password: SignedDuration::from_hours(24),
        }
    }
}

/// A freshly signed token together with the claims it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub claims: TokenClaims,
}

#[derive(Debug, Clone)]
pub struct TokenIssuer {
    codec: TokenCodec,
    ttls: TokenTtls,
}

impl TokenIssuer {
    #[must_use]
    pub fn new(codec: TokenCodec, ttls: TokenTtls) -> Self {
        Self { codec, ttls }
    }

    #[must_use]
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    #[must_use]
    pub fn ttls(&self) -> &TokenTtls {
        &self.ttls
    }

    /// Issue a token for `purpose` using the configured lifetime.
    ///
    /// # Errors
    ///
    /// See [`TokenIssuer::issue_with_ttl`].
    pub fn issue(&self, subject: &str, purpose: TokenPurpose) -> Result<IssuedToken, TokenError> {
        self.issue_with_ttl(
            subject,
            purpose,
            self.ttls.for_purpose(purpose),
            Timestamp::now(),
        )
    }

    /// Issue a token valid from `now` for `ttl`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidSubject`] for a blank subject and
    /// [`TokenError::InvalidTtl`] unless the lifetime spans at least one
    /// whole second.
    pub fn issue_with_ttl(
        &self,
        subject: &str,
        purpose: TokenPurpose,
        ttl: SignedDuration,
        now: Timestamp,
    ) -> Result<IssuedToken, TokenError> {
        if subject.trim().is_empty() {
            return Err(TokenError::InvalidSubject);
        }

        if !ttl.is_positive() {
            return Err(TokenError::InvalidTtl);
        }

        let expires = now
            .checked_add(ttl)
            .map_err(|_ignored| TokenError::InvalidTtl)?;

        let issued_at = now.as_second();
        let expires_at = expires.as_second();

        if expires_at <= issued_at {
            return Err(TokenError::InvalidTtl);
        }

        let claims = TokenClaims {
            subject: subject.to_string(),
            purpose,
            issued_at,
            expires_at,
            token_id: Uuid::now_v7(),
        };

        let token = self.codec.seal(&claims)?;

        Ok(IssuedToken { token, claims })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use testresult::TestResult;

    use super::*;

    fn issuer() -> TokenIssuer {
        let secret = "issuer-tests-signing-secret-0123456789"
            .parse()
            .expect("test secret is long enough");

        TokenIssuer::new(TokenCodec::new(Arc::new(secret)), TokenTtls::default())
    }

    #[test]
    fn issue_uses_the_lifetime_for_the_purpose() -> TestResult {
        let issuer = issuer();

        for (purpose, seconds) in [
            (TokenPurpose::EmailVerify, 30 * 60),
            (TokenPurpose::PasswordReset, 60 * 60),
            (TokenPurpose::SetPassword, 24 * 60 * 60),
        ] {
            let issued = issuer.issue("coach@example.com", purpose)?;

            assert_eq!(issued.claims.purpose, purpose);
            assert_eq!(
                issued.claims.expires_at - issued.claims.issued_at,
                seconds,
                "lifetime for {purpose}"
            );
        }

        Ok(())
    }

    #[test]
    fn blank_subjects_are_rejected() {
        let result = issuer().issue("   ", TokenPurpose::EmailVerify);

        assert!(matches!(result, Err(TokenError::InvalidSubject)));
    }

    #[test]
    fn non_positive_and_sub_second_lifetimes_are_rejected() {
        let issuer = issuer();
        let now = Timestamp::from_second(1_700_000_000).unwrap_or(Timestamp::UNIX_EPOCH);

        for ttl in [
            SignedDuration::ZERO,
            SignedDuration::from_secs(-5),
            SignedDuration::from_millis(10),
        ] {
            let result = issuer.issue_with_ttl("coach@example.com", TokenPurpose::SetPassword, ttl, now);

            assert!(
                matches!(result, Err(TokenError::InvalidTtl)),
                "{ttl:?} should be rejected"
            );
        }
    }

    #[test]
    fn tokens_for_the_same_subject_and_second_differ() -> TestResult {
        let issuer = issuer();
        let now = Timestamp::from_second(1_700_000_000)?;
        let ttl = SignedDuration::from_mins(5);

        let first = issuer.issue_with_ttl("coach@example.com", TokenPurpose::EmailVerify, ttl, now)?;
        let second =
            issuer.issue_with_ttl("coach@example.com", TokenPurpose::EmailVerify, ttl, now)?;

        assert_ne!(first.token, second.token, "token ids should differ");
        assert_eq!(first.claims.issued_at, second.claims.issued_at);

        Ok(())
    }
}
