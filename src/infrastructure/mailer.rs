//! HTTP mail relay client
//!
//! Outbound mail goes through an HTTP relay that accepts a JSON message
//! on `POST {base_url}/messages`. When no relay URL is configured every
//! send fails with [`MailerError::NotConfigured`] and the delivery
//! worker keeps the item queued.

use async_trait::async_trait;
use reqwest::Client;

use crate::application::ports::outbound::{MailMessage, MailerError, MailerPort};

/// Client for an HTTP mail relay
pub struct MailRelayClient {
    client: Client,
    base_url: Option<String>,
}

impl MailRelayClient {
    pub fn new(base_url: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.map(|u| u.trim_end_matches('/').to_string()),
        }
    }
}

#[async_trait]
impl MailerPort for MailRelayClient {
    async fn send(&self, message: &MailMessage) -> Result<(), MailerError> {
        let base_url = self.base_url.as_ref().ok_or(MailerError::NotConfigured)?;

        let response = self
            .client
            .post(format!("{}/messages", base_url))
            .json(message)
            .send()
            .await
            .map_err(|e| MailerError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(MailerError::Rejected(format!("{}: {}", status, error_text)));
        }

        tracing::debug!(
            subject = %message.subject,
            recipients = message.recipients.len(),
            "Mail relay accepted message"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_relay_refuses_to_send() {
        let mailer = MailRelayClient::new(None);
        let message = MailMessage {
            subject: "Hello".to_string(),
            sender: "noreply@example.com".to_string(),
            recipients: vec!["admin@example.com".to_string()],
            reply_to: None,
            body: "Hi".to_string(),
        };

        let err = mailer.send(&message).await.unwrap_err();
        assert!(matches!(err, MailerError::NotConfigured));
    }
}
