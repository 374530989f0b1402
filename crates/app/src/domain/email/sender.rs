//! Email sender seam.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("email request failed")]
    Http(#[from] reqwest::Error),

    #[error("email provider rejected the message: {0}")]
    Rejected(String),
}

#[automock]
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Deliver one HTML message.
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), DeliveryError>;
}
