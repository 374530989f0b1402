//! Sessions service.

use std::sync::Arc;

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use sha2::Sha256;
use sqlx::PgPool;

use crate::domain::{
    accounts::records::AccountUuid,
    sessions::{
        SessionSecret, SessionTokenVersion, SessionsServiceError, build_verifier_input, decode_hex,
        encode_hex, format_session_token, parse_session_token,
        records::{IssuedSession, NewSession, SessionUuid},
        repository::PgSessionsRepository,
    },
    tokens::SigningSecret,
};

type HmacSha256 = Hmac<Sha256>;

/// Default session lifetime.
pub const DEFAULT_SESSION_TTL: SignedDuration = SignedDuration::from_hours(30 * 24);

#[derive(Debug, Clone)]
pub struct PgSessionsService {
    repository: PgSessionsRepository,
    signing_secret: Arc<SigningSecret>,
    ttl: SignedDuration,
}

impl PgSessionsService {
    #[must_use]
    pub fn new(pool: PgPool, signing_secret: Arc<SigningSecret>, ttl: SignedDuration) -> Self {
        Self {
            repository: PgSessionsRepository::new(pool),
            signing_secret,
            ttl,
        }
    }

    fn mac(&self, input: &[u8]) -> Result<HmacSha256, SessionsServiceError> {
        Ok(HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .map_err(SessionsServiceError::SigningKey)?
            .chain_update(input))
    }

    /// Resolve a bearer credential to its session, checking the verifier hash.
    async fn verify(
        &self,
        bearer_token: &str,
    ) -> Result<(SessionUuid, AccountUuid), SessionsServiceError> {
        let parsed = parse_session_token(bearer_token)
            .map_err(|_ignored| SessionsServiceError::NotFound)?;

        let session = self
            .repository
            .find_active_session(parsed.session_uuid, parsed.version)
            .await?
            .ok_or(SessionsServiceError::NotFound)?;

        if session.version != parsed.version {
            return Err(SessionsServiceError::NotFound);
        }

        let expected = decode_hex(&session.token_hash).ok_or(SessionsServiceError::NotFound)?;

        let verifier_input = build_verifier_input(
            parsed.session_uuid,
            parsed.version,
            session.account_uuid,
            &parsed.secret,
        );

        self.mac(&verifier_input)?
            .verify_slice(&expected)
            .map_err(|_ignored| SessionsServiceError::NotFound)?;

        Ok((parsed.session_uuid, session.account_uuid))
    }
}

#[async_trait]
impl SessionsService for PgSessionsService {
    async fn issue(&self, account: AccountUuid) -> Result<IssuedSession, SessionsServiceError> {
        let session_uuid = SessionUuid::new();
        let version = SessionTokenVersion::V1;
        let secret = SessionSecret::generate();
        let token = format_session_token(session_uuid, version, &secret);

        let verifier_input = build_verifier_input(session_uuid, version, account, &secret);
        let token_hash = encode_hex(&self.mac(&verifier_input)?.finalize().into_bytes());

        let expires_at = Timestamp::now()
            .checked_add(self.ttl)
            .map_err(|_ignored| SessionsServiceError::InvalidLifetime)?;

        let session = self
            .repository
            .create_session(&NewSession {
                uuid: session_uuid,
                account_uuid: account,
                version,
                token_hash,
                expires_at,
            })
            .await?;

        tracing::info!(%account, session = %session_uuid, "session issued");

        Ok(IssuedSession { token, session })
    }

    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AccountUuid, SessionsServiceError> {
        let (session, account) = self.verify(bearer_token).await?;

        // Best-effort metadata update; auth success should not depend on this write.
        if let Err(error) = self.repository.touch_session(session).await {
            tracing::warn!(%session, %error, "failed to record session use");
        }

        Ok(account)
    }

    async fn revoke(&self, bearer_token: &str) -> Result<(), SessionsServiceError> {
        let (session, account) = self.verify(bearer_token).await?;

        if !self.repository.revoke_session(session).await? {
            return Err(SessionsServiceError::NotFound);
        }

        tracing::info!(%account, %session, "session revoked");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait SessionsService: Send + Sync {
    /// Start a session for `account`. The raw token is only available here.
    async fn issue(&self, account: AccountUuid) -> Result<IssuedSession, SessionsServiceError>;

    /// Resolve a bearer credential to the account it belongs to.
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AccountUuid, SessionsServiceError>;

    async fn revoke(&self, bearer_token: &str) -> Result<(), SessionsServiceError>;
}
