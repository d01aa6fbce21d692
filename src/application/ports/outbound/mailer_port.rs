//! Mailer port - contract for outbound email delivery

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A fully composed outbound email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailMessage {
    pub subject: String,
    pub sender: String,
    pub recipients: Vec<String>,
    pub reply_to: Option<String>,
    pub body: String,
}

/// Errors surfaced by mailer implementations
#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("mail transport error: {0}")]
    Transport(String),

    #[error("mail relay rejected the message: {0}")]
    Rejected(String),

    #[error("mail delivery is not configured")]
    NotConfigured,
}

/// Contract for delivering composed messages
#[async_trait]
pub trait MailerPort: Send + Sync {
    async fn send(&self, message: &MailMessage) -> Result<(), MailerError>;
}
