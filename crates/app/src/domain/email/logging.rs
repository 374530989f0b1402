//! Sender that only logs, for deployments without an email provider.

use async_trait::async_trait;

use crate::domain::email::{DeliveryError, EmailSender};

#[derive(Debug, Clone, Copy, Default)]
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), DeliveryError> {
        tracing::info!(%to, %subject, body_len = html.len(), "email not sent: no provider configured");
        tracing::debug!(%to, %html, "email body");

        Ok(())
    }
}
