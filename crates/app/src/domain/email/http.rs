//! Transactional email over a JSON HTTP API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::domain::email::{DeliveryError, EmailSender};

/// Configuration for the transactional email API.
#[derive(Debug, Clone)]
pub struct HttpEmailConfig {
    /// Endpoint messages are posted to.
    pub url: String,

    /// Bearer key for the provider.
    pub api_key: String,

    /// Sender address.
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct HttpEmailSender {
    config: HttpEmailConfig,
    http: Client,
}

impl HttpEmailSender {
    #[must_use]
    pub fn new(config: HttpEmailConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmailAddress<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailBody<'a> {
    sender: EmailAddress<'a>,
    to: [EmailAddress<'a>; 1],
    subject: &'a str,
    html_content: &'a str,
}

#[async_trait]
impl EmailSender for HttpEmailSender {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), DeliveryError> {
        let body = SendEmailBody {
            sender: EmailAddress {
                email: &self.config.from,
            },
            to: [EmailAddress { email: to }],
            subject,
            html_content: html,
        };

        let response = self
            .http
            .post(&self.config.url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(DeliveryError::Rejected(format!(
                "send failed with status {status}: {text}"
            )));
        }

        tracing::debug!(%to, %subject, "email accepted by provider");

        Ok(())
    }
}
