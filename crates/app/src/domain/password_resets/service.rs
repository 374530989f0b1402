//! Password resets service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        accounts::records::AccountUuid,
        password_resets::{
            records::PasswordResetRecord, repository::PgPasswordResetsRepository, token_hash,
        },
        tokens::{IssuedToken, TokenError, TokenIssuer, TokenPurpose},
    },
};

/// Read access to persisted reset records, keyed by the token they were issued for.
#[automock]
#[async_trait]
pub trait PasswordResetStore: Send + Sync {
    async fn find_by_token(&self, token: &str) -> Result<Option<PasswordResetRecord>, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct PgPasswordResetsService {
    db: Db,
    issuer: TokenIssuer,
    repository: PgPasswordResetsRepository,
}

impl PgPasswordResetsService {
    #[must_use]
    pub fn new(db: Db, issuer: TokenIssuer) -> Self {
        Self {
            db,
            issuer,
            repository: PgPasswordResetsRepository::new(),
        }
    }

    /// Issue a reset token for `account`, superseding any active one.
    ///
    /// Invalidation and insert share a transaction, so an owner never has two
    /// active records.
    ///
    /// # Errors
    ///
    /// Returns an error when signing fails or the database is unavailable.
    pub async fn issue(
        &self,
        account: AccountUuid,
        email: &str,
    ) -> Result<IssuedToken, TokenError> {
        let issued = self.issuer.issue(email, TokenPurpose::PasswordReset)?;
        let expires_at = Timestamp::from_second(issued.claims.expires_at)
            .map_err(|_ignored| TokenError::InvalidTtl)?;

        let mut tx = self.db.begin().await?;

        let superseded = self
            .repository
            .invalidate_active_for_account(&mut tx, account)
            .await?;

        self.repository
            .create(&mut tx, account, &token_hash(&issued.token), expires_at)
            .await?;

        tx.commit().await?;

        tracing::debug!(%account, superseded, "issued password reset");

        Ok(issued)
    }

    /// Delete records that expired before `before`. Returns the number removed.
    ///
    /// # Errors
    ///
    /// Returns an error when the database is unavailable.
    pub async fn prune_expired(&self, before: Timestamp) -> Result<u64, sqlx::Error> {
        prune_expired_resets(&self.db, before).await
    }

    pub(crate) fn repository(&self) -> &PgPasswordResetsRepository {
        &self.repository
    }
}

/// Delete reset records that expired before `before`.
///
/// Needs no signing secret, so operators can run it without one.
///
/// # Errors
///
/// Returns an error when the database is unavailable.
pub async fn prune_expired_resets(db: &Db, before: Timestamp) -> Result<u64, sqlx::Error> {
    let mut conn = db.pool().acquire().await?;

    PgPasswordResetsRepository::new()
        .delete_expired(&mut conn, before)
        .await
}

#[async_trait]
impl PasswordResetStore for PgPasswordResetsService {
    async fn find_by_token(&self, token: &str) -> Result<Option<PasswordResetRecord>, sqlx::Error> {
        let mut conn = self.db.pool().acquire().await?;

        self.repository
            .find_by_token_hash(&mut conn, &token_hash(token))
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jiff::SignedDuration;
    use testresult::TestResult;

    use crate::{
        domain::tokens::{TokenCodec, TokenTtls},
        test::{TestContext, insert_account},
    };

    use super::*;

    fn service(ctx: &TestContext) -> PgPasswordResetsService {
        let codec = TokenCodec::new(Arc::clone(&ctx.signing_secret));

        PgPasswordResetsService::new(
            Db::new(ctx.db.pool().clone()),
            TokenIssuer::new(codec, TokenTtls::default()),
        )
    }

    #[tokio::test]
    async fn issue_persists_a_hashed_active_record() -> TestResult {
        let ctx = TestContext::new().await;
        let resets = service(&ctx);
        let account = insert_account(&ctx, "reset@example.com").await?;

        let issued = resets.issue(account, "reset@example.com").await?;
        let record = resets
            .find_by_token(&issued.token)
            .await?
            .ok_or("record should exist")?;

        assert_eq!(record.account_uuid, account);
        assert_ne!(record.token_hash, issued.token, "raw token is not stored");
        assert!(record.is_active_at(Timestamp::now()), "fresh record is active");
        assert_eq!(record.expires_at.as_second(), issued.claims.expires_at);

        Ok(())
    }

    #[tokio::test]
    async fn issuing_again_supersedes_the_previous_record() -> TestResult {
        let ctx = TestContext::new().await;
        let resets = service(&ctx);
        let account = insert_account(&ctx, "twice@example.com").await?;

        let first = resets.issue(account, "twice@example.com").await?;
        let second = resets.issue(account, "twice@example.com").await?;

        let first = resets
            .find_by_token(&first.token)
            .await?
            .ok_or("first record should exist")?;
        let second = resets
            .find_by_token(&second.token)
            .await?
            .ok_or("second record should exist")?;

        assert!(first.used, "older record is superseded");
        assert!(first.used_at.is_some());
        assert!(!second.used, "newest record stays active");

        Ok(())
    }

    #[tokio::test]
    async fn mark_used_only_succeeds_once() -> TestResult {
        let ctx = TestContext::new().await;
        let resets = service(&ctx);
        let account = insert_account(&ctx, "once@example.com").await?;
        let issued = resets.issue(account, "once@example.com").await?;
        let hash = token_hash(&issued.token);

        let mut conn = ctx.db.pool().acquire().await?;

        assert_eq!(resets.repository().mark_used(&mut conn, &hash).await?, 1);
        assert_eq!(resets.repository().mark_used(&mut conn, &hash).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn prune_removes_only_records_expired_before_the_cutoff() -> TestResult {
        let ctx = TestContext::new().await;
        let resets = service(&ctx);
        let account = insert_account(&ctx, "prune@example.com").await?;
        let issued = resets.issue(account, "prune@example.com").await?;

        assert_eq!(resets.prune_expired(Timestamp::now()).await?, 0);

        let removed = resets
            .prune_expired(Timestamp::now() + SignedDuration::from_hours(2))
            .await?;

        assert_eq!(removed, 1);
        assert!(resets.find_by_token(&issued.token).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn prune_works_without_a_token_issuer() -> TestResult {
        let ctx = TestContext::new().await;
        let resets = service(&ctx);
        let account = insert_account(&ctx, "secretless@example.com").await?;

        resets.issue(account, "secretless@example.com").await?;

        let db = Db::new(ctx.db.pool().clone());
        let removed =
            prune_expired_resets(&db, Timestamp::now() + SignedDuration::from_hours(2)).await?;

        assert_eq!(removed, 1);

        Ok(())
    }
}
