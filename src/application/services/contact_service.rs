//! Contact service - accepts contact form submissions and hands them to
//! the outbound mail queue

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use tracing::instrument;

use crate::application::dto::ContactMessage;
use crate::application::ports::outbound::{QueueItemId, QueuePort};

/// Contact service trait defining the application use cases
#[async_trait]
pub trait ContactService: Send + Sync {
    /// Accept a submission for asynchronous delivery; returns the queue
    /// item id
    async fn submit(&self, email: String, message: String) -> Result<QueueItemId>;

    /// Number of submissions still awaiting delivery
    async fn queue_depth(&self) -> Result<usize>;
}

/// Default implementation of ContactService over a persistent queue
pub struct ContactServiceImpl<Q: QueuePort<ContactMessage>> {
    pub queue: Q,
}

impl<Q: QueuePort<ContactMessage>> ContactServiceImpl<Q> {
    pub fn new(queue: Q) -> Self {
        Self { queue }
    }

    fn validate_submission(email: &str, message: &str) -> Result<()> {
        if email.len() < 3 || email.len() > 254 {
            anyhow::bail!("Email address must be between 3 and 254 characters");
        }
        let Some((local, domain)) = email.split_once('@') else {
            anyhow::bail!("Email address must contain '@'");
        };
        if local.is_empty() || domain.is_empty() {
            anyhow::bail!("Email address is malformed");
        }
        if message.trim().is_empty() {
            anyhow::bail!("Message cannot be empty");
        }
        if message.len() > 8192 {
            anyhow::bail!("Message cannot exceed 8192 characters");
        }
        Ok(())
    }
}

#[async_trait]
impl<Q: QueuePort<ContactMessage>> ContactService for ContactServiceImpl<Q> {
    #[instrument(skip(self, message), fields(email = %email))]
    async fn submit(&self, email: String, message: String) -> Result<QueueItemId> {
        Self::validate_submission(&email, &message)?;

        let id = self
            .queue
            .enqueue(ContactMessage {
                email,
                message,
                submitted_at: Utc::now(),
            })
            .await
            .context("Failed to enqueue contact submission")?;

        tracing::info!(item = %id, "Contact submission queued");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn queue_depth(&self) -> Result<usize> {
        let depth = self
            .queue
            .depth()
            .await
            .context("Failed to read contact queue depth")?;
        Ok(depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::SqliteRepository;
    use crate::infrastructure::queues::SqliteQueue;

    type Impl = ContactServiceImpl<SqliteQueue<ContactMessage>>;

    async fn service() -> Impl {
        let repository = SqliteRepository::in_memory().await.unwrap();
        let queue = SqliteQueue::new(repository.pool().clone(), "contact_mail", 3)
            .await
            .unwrap();
        ContactServiceImpl::new(queue)
    }

    #[tokio::test]
    async fn test_submit_enqueues_payload() {
        let service = service().await;

        service
            .submit("fan@example.com".to_string(), "Love the compendium".to_string())
            .await
            .unwrap();
        assert_eq!(service.queue_depth().await.unwrap(), 1);

        let item = service.queue.dequeue().await.unwrap().unwrap();
        assert_eq!(item.payload.email, "fan@example.com");
        assert_eq!(item.payload.message, "Love the compendium");
    }

    #[tokio::test]
    async fn test_submit_rejects_bad_input() {
        let service = service().await;

        let err = service
            .submit("not-an-email".to_string(), "hello".to_string())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("@"));

        let err = service
            .submit("a@b.com".to_string(), "  ".to_string())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("empty"));

        let err = service
            .submit("a@b.com".to_string(), "x".repeat(8193))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("8192"));

        assert_eq!(service.queue_depth().await.unwrap(), 0);
    }
}
