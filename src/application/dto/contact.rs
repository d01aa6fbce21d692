//! Contact form DTOs and the mail queue payload

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contact form submission
#[derive(Debug, Clone, Deserialize)]
pub struct ContactRequestDto {
    pub email: String,
    pub message: String,
}

/// Queue payload for a contact submission awaiting delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub email: String,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}

/// Response for an accepted contact submission
#[derive(Debug, Clone, Serialize)]
pub struct ContactAcceptedDto {
    /// Queue item id for the pending delivery
    pub queued_id: String,
}

/// Snapshot of the outbound mail queue
#[derive(Debug, Clone, Serialize)]
pub struct QueueStatusDto {
    pub depth: usize,
}
