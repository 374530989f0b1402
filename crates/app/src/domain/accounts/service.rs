//! Accounts service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        accounts::{
            data::{NewAccount, normalize_email},
            errors::AccountsServiceError,
            password::{hash_password, validate_password, verify_password},
            records::{AccountRecord, AccountUuid},
            repository::PgAccountsRepository,
        },
        email::{EmailSender, LinkBuilder, templates},
        password_resets::{PgPasswordResetsService, token_hash},
        tokens::{TokenError, TokenIssuer, TokenPurpose, TokenVerifiers},
    },
};

#[derive(Clone)]
pub struct PgAccountsService {
    db: Db,
    repository: PgAccountsRepository,
    resets: PgPasswordResetsService,
    issuer: TokenIssuer,
    verifiers: TokenVerifiers,
    email: Arc<dyn EmailSender>,
    links: LinkBuilder,
}

impl PgAccountsService {
    #[must_use]
    pub fn new(
        db: Db,
        issuer: TokenIssuer,
        email: Arc<dyn EmailSender>,
        links: LinkBuilder,
    ) -> Self {
        let resets = PgPasswordResetsService::new(db.clone(), issuer.clone());
        let verifiers = TokenVerifiers::new(issuer.codec().clone(), Arc::new(resets.clone()));

        Self {
            db,
            repository: PgAccountsRepository::new(),
            resets,
            issuer,
            verifiers,
            email,
            links,
        }
    }

    /// Email a link for `purpose`. Delivery failures are logged, not returned:
    /// the account change already happened and the owner can ask again.
    async fn send_link(&self, to: &str, purpose: TokenPurpose, token: &str) {
        let link = self.links.link(purpose, token);
        let (subject, html) = templates::link_email(purpose, &link);

        if let Err(error) = self.email.send(to, subject, &html).await {
            tracing::error!(%to, %purpose, %error, "failed to send account email");
        }
    }

    async fn issue_and_send(&self, to: &str, purpose: TokenPurpose) -> Result<(), TokenError> {
        let issued = self.issuer.issue(to, purpose)?;

        self.send_link(to, purpose, &issued.token).await;

        Ok(())
    }
}

impl std::fmt::Debug for PgAccountsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgAccountsService")
            .field("links", &self.links)
            .finish_non_exhaustive()
    }
}

/// Argon2 runs on the blocking pool.
async fn hash_blocking(password: String) -> Result<String, AccountsServiceError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|error| AccountsServiceError::PasswordHash(error.to_string()))?
}

async fn verify_blocking(password: String, hash: String) -> Result<bool, AccountsServiceError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|error| AccountsServiceError::PasswordHash(error.to_string()))?
}

#[async_trait]
impl AccountsService for PgAccountsService {
    async fn register(&self, account: NewAccount) -> Result<AccountRecord, AccountsServiceError> {
        let email = normalize_email(&account.email)?;

        let password_hash = match account.password {
            Some(password) => Some(hash_blocking(password).await?),
            None => None,
        };

        let mut conn = self.db.pool().acquire().await?;

        let created = self
            .repository
            .create_account(
                &mut conn,
                AccountUuid::new(),
                &email,
                password_hash.as_deref(),
            )
            .await?;

        drop(conn);

        let purpose = if created.has_password {
            TokenPurpose::EmailVerify
        } else {
            TokenPurpose::SetPassword
        };

        self.issue_and_send(&created.email, purpose).await?;

        tracing::info!(account = %created.uuid, %purpose, "account registered");

        Ok(created)
    }

    async fn resend_verification(&self, email: &str) -> Result<(), AccountsServiceError> {
        let email = normalize_email(email)?;
        let mut conn = self.db.pool().acquire().await?;

        let Some(found) = self.repository.find_by_email(&mut conn, &email).await? else {
            tracing::debug!("verification resend for unknown email");
            return Ok(());
        };

        drop(conn);

        let account = found.account;

        if account.is_verified() {
            return Ok(());
        }

        let purpose = if account.has_password {
            TokenPurpose::EmailVerify
        } else {
            TokenPurpose::SetPassword
        };

        self.issue_and_send(&account.email, purpose).await?;

        Ok(())
    }

    async fn verify_email(&self, token: &str) -> Result<AccountRecord, AccountsServiceError> {
        let verified = self
            .verifiers
            .verify(token, TokenPurpose::EmailVerify)
            .await?;

        let mut conn = self.db.pool().acquire().await?;

        let account = self
            .repository
            .mark_email_verified(&mut conn, verified.subject())
            .await?;

        tracing::info!(account = %account.uuid, "email verified");

        Ok(account)
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), AccountsServiceError> {
        let Ok(email) = normalize_email(email) else {
            return Ok(());
        };

        let mut conn = self.db.pool().acquire().await?;

        let Some(found) = self.repository.find_by_email(&mut conn, &email).await? else {
            tracing::debug!("password reset requested for unknown email");
            return Ok(());
        };

        drop(conn);

        let issued = self.resets.issue(found.account.uuid, &email).await?;

        self.send_link(&email, TokenPurpose::PasswordReset, &issued.token)
            .await;

        Ok(())
    }

    async fn reset_password(
        &self,
        token: &str,
        password: String,
    ) -> Result<(), AccountsServiceError> {
        validate_password(&password)?;

        let verified = self
            .verifiers
            .verify(token, TokenPurpose::PasswordReset)
            .await?;

        let owner = verified.owner.ok_or(TokenError::Expired)?;
        let password_hash = hash_blocking(password).await?;

        let mut tx = self.db.begin().await?;

        let consumed = self
            .resets
            .repository()
            .mark_used(&mut tx, &token_hash(token))
            .await?;

        if consumed == 0 {
            return Err(TokenError::AlreadyUsed.into());
        }

        self.repository
            .set_password_hash(&mut tx, owner, &password_hash)
            .await?;

        tx.commit().await?;

        tracing::info!(account = %owner, "password reset");

        Ok(())
    }

    async fn set_password(
        &self,
        token: &str,
        password: String,
    ) -> Result<AccountRecord, AccountsServiceError> {
        validate_password(&password)?;

        let verified = self
            .verifiers
            .verify(token, TokenPurpose::SetPassword)
            .await?;

        let password_hash = hash_blocking(password).await?;
        let mut conn = self.db.pool().acquire().await?;

        // Only the first password; later changes go through the reset flow.
        let Some(account) = self
            .repository
            .set_initial_password(&mut conn, verified.subject(), &password_hash)
            .await?
        else {
            return Err(TokenError::AlreadyUsed.into());
        };

        tracing::info!(account = %account.uuid, "password set");

        Ok(account)
    }

    async fn authenticate(
        &self,
        email: &str,
        password: String,
    ) -> Result<AccountRecord, AccountsServiceError> {
        let email = normalize_email(email).map_err(|_ignored| AccountsServiceError::InvalidCredentials)?;
        let mut conn = self.db.pool().acquire().await?;

        let found = self
            .repository
            .find_by_email(&mut conn, &email)
            .await?
            .ok_or(AccountsServiceError::InvalidCredentials)?;

        drop(conn);

        let password_hash = found
            .password_hash
            .ok_or(AccountsServiceError::InvalidCredentials)?;

        if !verify_blocking(password, password_hash).await? {
            return Err(AccountsServiceError::InvalidCredentials);
        }

        Ok(found.account)
    }
}

#[automock]
#[async_trait]
pub trait AccountsService: Send + Sync {
    /// Create an account and email a verification or set-password link.
    async fn register(&self, account: NewAccount) -> Result<AccountRecord, AccountsServiceError>;

    /// Send a fresh link to an unverified account. Unknown addresses succeed silently.
    async fn resend_verification(&self, email: &str) -> Result<(), AccountsServiceError>;

    /// Confirm an email address with an `email-verify` token.
    async fn verify_email(&self, token: &str) -> Result<AccountRecord, AccountsServiceError>;

    /// Email a password reset link. Unknown addresses succeed silently.
    async fn request_password_reset(&self, email: &str) -> Result<(), AccountsServiceError>;

    /// Consume a reset token and replace the password.
    async fn reset_password(&self, token: &str, password: String)
    -> Result<(), AccountsServiceError>;

    /// Choose the first password with a `set-password` token. Accounts that
    /// already have one reject the token as used.
    async fn set_password(
        &self,
        token: &str,
        password: String,
    ) -> Result<AccountRecord, AccountsServiceError>;

    /// Check sign in credentials.
    async fn authenticate(
        &self,
        email: &str,
        password: String,
    ) -> Result<AccountRecord, AccountsServiceError>;
}
