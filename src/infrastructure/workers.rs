//! Background workers for the outbound mail queue

use std::sync::Arc;
use std::time::Duration;

use crate::application::dto::ContactMessage;
use crate::application::ports::outbound::{MailMessage, MailerPort, QueueItem, QueuePort};
use crate::infrastructure::state::AppState;

const IDLE_POLL: Duration = Duration::from_millis(500);
const ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// Compose the outbound email for a contact submission. Replies go
/// straight to the submitter.
fn compose_contact_mail(state: &AppState, item: &QueueItem<ContactMessage>) -> MailMessage {
    MailMessage {
        subject: "[World Manager] Contact".to_string(),
        sender: state.config.mail.sender.clone(),
        recipients: vec![state.config.mail.contact_recipient.clone()],
        reply_to: Some(item.payload.email.clone()),
        body: format!(
            "From: {}\nSubmitted: {}\n\n{}",
            item.payload.email, item.payload.submitted_at, item.payload.message
        ),
    }
}

/// Worker that delivers queued contact submissions through the mail relay
pub async fn mail_delivery_worker(state: Arc<AppState>) {
    tracing::info!("Starting mail delivery worker");
    let queue = &state.contact_service.queue;

    loop {
        match queue.dequeue().await {
            Ok(Some(item)) => {
                let message = compose_contact_mail(&state, &item);
                match state.mailer.send(&message).await {
                    Ok(()) => {
                        if let Err(e) = queue.complete(item.id).await {
                            tracing::error!("Failed to mark mail item complete: {}", e);
                        } else {
                            tracing::info!(item = %item.id, "Contact mail delivered");
                        }
                    }
                    Err(e) => {
                        tracing::warn!(item = %item.id, "Contact mail delivery failed: {}", e);
                        if let Err(e) = queue.fail(item.id, &e.to_string()).await {
                            tracing::error!("Failed to record mail delivery failure: {}", e);
                        }
                        tokio::time::sleep(ERROR_BACKOFF).await;
                    }
                }
            }
            Ok(None) => {
                tokio::time::sleep(IDLE_POLL).await;
            }
            Err(e) => {
                tracing::error!("Error reading mail queue: {}", e);
                tokio::time::sleep(ERROR_BACKOFF).await;
            }
        }
    }
}

/// Worker that periodically drops delivered and dead queue items
pub async fn queue_cleanup_worker(state: Arc<AppState>) {
    tracing::info!("Starting queue cleanup worker");
    let retention = Duration::from_secs(state.config.queue.retention_hours * 3600);
    let queue = &state.contact_service.queue;

    loop {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        match queue.cleanup(retention).await {
            Ok(removed) if removed > 0 => {
                tracing::info!(removed, "Dropped old mail queue items");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!("Queue cleanup failed: {}", e);
            }
        }
    }
}
