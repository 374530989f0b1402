//! Token verification.
//!
//! Email verification and set-password tokens are checked from the token
//! alone. Password reset tokens additionally need an unused record in the
//! reset store, so they can be consumed and superseded.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::domain::{
    accounts::records::AccountUuid,
    password_resets::PasswordResetStore,
    tokens::{TokenClaims, TokenCodec, TokenError, TokenPurpose},
};

/// Claims of a token that passed verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub claims: TokenClaims,

    /// Account owning the persisted record, for revocable tokens.
    pub owner: Option<AccountUuid>,
}

impl VerifiedToken {
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.claims.subject
    }
}

#[automock]
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify `token` was issued by this server for `expected` and is still valid.
    async fn verify(&self, token: &str, expected: TokenPurpose)
    -> Result<VerifiedToken, TokenError>;
}

#[derive(Debug, Clone)]
pub struct StatelessVerifier {
    codec: TokenCodec,
}

impl StatelessVerifier {
    #[must_use]
    pub fn new(codec: TokenCodec) -> Self {
        Self { codec }
    }

    /// Verify against an explicit clock.
    ///
    /// # Errors
    ///
    /// Returns the first failing check: shape, signature, purpose, expiry.
    pub fn verify_at(
        &self,
        token: &str,
        expected: TokenPurpose,
        now: Timestamp,
    ) -> Result<VerifiedToken, TokenError> {
        let claims = self.codec.open(token)?;

        if claims.purpose != expected {
            return Err(TokenError::PurposeMismatch {
                expected,
                actual: claims.purpose,
            });
        }

        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        Ok(VerifiedToken {
            claims,
            owner: None,
        })
    }
}

#[async_trait]
impl TokenVerifier for StatelessVerifier {
    async fn verify(
        &self,
        token: &str,
        expected: TokenPurpose,
    ) -> Result<VerifiedToken, TokenError> {
        self.verify_at(token, expected, Timestamp::now())
    }
}

#[derive(Clone)]
pub struct RevocableVerifier {
    inner: StatelessVerifier,
    store: Arc<dyn PasswordResetStore>,
}

impl RevocableVerifier {
    #[must_use]
    pub fn new(inner: StatelessVerifier, store: Arc<dyn PasswordResetStore>) -> Self {
        Self { inner, store }
    }

    /// Verify against an explicit clock.
    ///
    /// # Errors
    ///
    /// Everything [`StatelessVerifier::verify_at`] rejects, plus
    /// [`TokenError::Expired`] when no record exists or the record itself has
    /// lapsed and [`TokenError::AlreadyUsed`] when it was consumed or superseded.
    pub async fn verify_at(
        &self,
        token: &str,
        expected: TokenPurpose,
        now: Timestamp,
    ) -> Result<VerifiedToken, TokenError> {
        let mut verified = self.inner.verify_at(token, expected, now)?;

        let Some(record) = self.store.find_by_token(token).await? else {
            return Err(TokenError::Expired);
        };

        if record.used {
            return Err(TokenError::AlreadyUsed);
        }

        if record.expires_at < now {
            return Err(TokenError::Expired);
        }

        verified.owner = Some(record.account_uuid);

        Ok(verified)
    }
}

impl fmt::Debug for RevocableVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevocableVerifier")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenVerifier for RevocableVerifier {
    async fn verify(
        &self,
        token: &str,
        expected: TokenPurpose,
    ) -> Result<VerifiedToken, TokenError> {
        self.verify_at(token, expected, Timestamp::now()).await
    }
}

/// Chooses the verifier a purpose requires.
#[derive(Debug, Clone)]
pub struct TokenVerifiers {
    stateless: StatelessVerifier,
    revocable: RevocableVerifier,
}

impl TokenVerifiers {
    #[must_use]
    pub fn new(codec: TokenCodec, store: Arc<dyn PasswordResetStore>) -> Self {
        let stateless = StatelessVerifier::new(codec);

        Self {
            revocable: RevocableVerifier::new(stateless.clone(), store),
            stateless,
        }
    }

    #[must_use]
    pub fn for_purpose(&self, purpose: TokenPurpose) -> &dyn TokenVerifier {
        if purpose.is_revocable() {
            &self.revocable
        } else {
            &self.stateless
        }
    }

    /// Verify `token` with whichever verifier `expected` requires.
    ///
    /// # Errors
    ///
    /// See [`StatelessVerifier::verify_at`] and [`RevocableVerifier::verify_at`].
    pub async fn verify(
        &self,
        token: &str,
        expected: TokenPurpose,
    ) -> Result<VerifiedToken, TokenError> {
        self.for_purpose(expected).verify(token, expected).await
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use testresult::TestResult;

    use crate::domain::{
        password_resets::{MockPasswordResetStore, records::PasswordResetRecord, token_hash},
        password_resets::records::PasswordResetUuid,
        tokens::{TokenIssuer, TokenTtls},
    };

    use super::*;

    const SECRET: &str = "verifier-tests-signing-secret-0123456789";

    fn codec() -> TokenCodec {
        TokenCodec::new(Arc::new(SECRET.parse().expect("test secret is long enough")))
    }

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(codec(), TokenTtls::default())
    }

    fn epoch(second: i64) -> Timestamp {
        Timestamp::from_second(second).expect("valid test timestamp")
    }

    fn record(token: &str, used: bool, expires_at: Timestamp) -> PasswordResetRecord {
        PasswordResetRecord {
            uuid: PasswordResetUuid::new(),
            account_uuid: AccountUuid::new(),
            token_hash: token_hash(token),
            expires_at,
            used,
            used_at: None,
            created_at: epoch(1_700_000_000),
        }
    }

    #[test]
    fn verifies_subject_of_a_fresh_token() -> TestResult {
        let issued = issuer().issue("coach@example.com", TokenPurpose::EmailVerify)?;
        let verified = StatelessVerifier::new(codec()).verify_at(
            &issued.token,
            TokenPurpose::EmailVerify,
            Timestamp::now(),
        )?;

        assert_eq!(verified.subject(), "coach@example.com");
        assert_eq!(verified.owner, None);

        Ok(())
    }

    #[test]
    fn token_for_one_purpose_is_rejected_for_another() -> TestResult {
        let issued = issuer().issue("coach@example.com", TokenPurpose::EmailVerify)?;
        let result = StatelessVerifier::new(codec()).verify_at(
            &issued.token,
            TokenPurpose::SetPassword,
            Timestamp::now(),
        );

        assert!(
            matches!(
                result,
                Err(TokenError::PurposeMismatch {
                    expected: TokenPurpose::SetPassword,
                    actual: TokenPurpose::EmailVerify,
                })
            ),
            "got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn token_is_valid_at_expiry_and_rejected_one_second_later() -> TestResult {
        let issued_at = epoch(1_700_000_000);
        let issued = issuer().issue_with_ttl(
            "coach@example.com",
            TokenPurpose::SetPassword,
            SignedDuration::from_secs(60),
            issued_at,
        )?;
        let verifier = StatelessVerifier::new(codec());

        verifier.verify_at(&issued.token, TokenPurpose::SetPassword, epoch(1_700_000_060))?;

        let result =
            verifier.verify_at(&issued.token, TokenPurpose::SetPassword, epoch(1_700_000_061));

        assert!(matches!(result, Err(TokenError::Expired)), "got {result:?}");

        Ok(())
    }

    #[test]
    fn signature_is_checked_before_purpose_and_expiry() -> TestResult {
        let issued = issuer().issue_with_ttl(
            "coach@example.com",
            TokenPurpose::EmailVerify,
            SignedDuration::from_secs(1),
            epoch(1_000),
        )?;
        let other = TokenCodec::new(Arc::new(
            "some-other-signing-secret-0123456789abcd".parse()?,
        ));
        let result = StatelessVerifier::new(other).verify_at(
            &issued.token,
            TokenPurpose::SetPassword,
            epoch(2_000_000_000),
        );

        assert!(
            matches!(result, Err(TokenError::InvalidSignature)),
            "got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn revocable_token_reports_the_record_owner() -> TestResult {
        let issued = issuer().issue("coach@example.com", TokenPurpose::PasswordReset)?;
        let stored = record(&issued.token, false, epoch(issued.claims.expires_at));
        let owner = stored.account_uuid;

        let mut store = MockPasswordResetStore::new();
        store
            .expect_find_by_token()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let verifiers = TokenVerifiers::new(codec(), Arc::new(store));
        let verified = verifiers
            .verify(&issued.token, TokenPurpose::PasswordReset)
            .await?;

        assert_eq!(verified.owner, Some(owner));

        Ok(())
    }

    #[tokio::test]
    async fn revocable_token_without_record_is_expired() -> TestResult {
        let issued = issuer().issue("coach@example.com", TokenPurpose::PasswordReset)?;

        let mut store = MockPasswordResetStore::new();
        store.expect_find_by_token().returning(|_| Ok(None));

        let result = TokenVerifiers::new(codec(), Arc::new(store))
            .verify(&issued.token, TokenPurpose::PasswordReset)
            .await;

        assert!(matches!(result, Err(TokenError::Expired)), "got {result:?}");

        Ok(())
    }

    #[tokio::test]
    async fn used_record_rejects_token_as_already_used() -> TestResult {
        let issued = issuer().issue("coach@example.com", TokenPurpose::PasswordReset)?;
        let stored = record(&issued.token, true, epoch(issued.claims.expires_at));

        let mut store = MockPasswordResetStore::new();
        store
            .expect_find_by_token()
            .returning(move |_| Ok(Some(stored.clone())));

        let result = TokenVerifiers::new(codec(), Arc::new(store))
            .verify(&issued.token, TokenPurpose::PasswordReset)
            .await;

        assert!(
            matches!(result, Err(TokenError::AlreadyUsed)),
            "got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn lapsed_record_rejects_token_as_expired() -> TestResult {
        let now = Timestamp::now();
        let issued = issuer().issue("coach@example.com", TokenPurpose::PasswordReset)?;
        let stored = record(&issued.token, false, now - SignedDuration::from_secs(1));

        let mut store = MockPasswordResetStore::new();
        store
            .expect_find_by_token()
            .returning(move |_| Ok(Some(stored.clone())));

        let result = RevocableVerifier::new(StatelessVerifier::new(codec()), Arc::new(store))
            .verify_at(&issued.token, TokenPurpose::PasswordReset, now)
            .await;

        assert!(matches!(result, Err(TokenError::Expired)), "got {result:?}");

        Ok(())
    }

    #[tokio::test]
    async fn stateless_purposes_never_touch_the_store() -> TestResult {
        let issued = issuer().issue("coach@example.com", TokenPurpose::SetPassword)?;

        let mut store = MockPasswordResetStore::new();
        store.expect_find_by_token().never();

        let verified = TokenVerifiers::new(codec(), Arc::new(store))
            .verify(&issued.token, TokenPurpose::SetPassword)
            .await?;

        assert_eq!(verified.subject(), "coach@example.com");

        Ok(())
    }
}
