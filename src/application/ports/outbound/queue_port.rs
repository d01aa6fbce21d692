//! Queue port - contract for the persistent outbound work queue

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of an item sitting in a queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueueItemId(Uuid);

impl QueueItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for QueueItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for QueueItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a queue item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueItemStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl QueueItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueItemStatus::Pending => "pending",
            QueueItemStatus::Processing => "processing",
            QueueItemStatus::Completed => "completed",
            QueueItemStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(QueueItemStatus::Pending),
            "processing" => Some(QueueItemStatus::Processing),
            "completed" => Some(QueueItemStatus::Completed),
            "failed" => Some(QueueItemStatus::Failed),
            _ => None,
        }
    }
}

/// A queued payload with its bookkeeping
#[derive(Debug, Clone)]
pub struct QueueItem<T> {
    pub id: QueueItemId,
    pub payload: T,
    pub status: QueueItemStatus,
    /// Delivery attempts so far
    pub attempts: u32,
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Errors surfaced by queue backends
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("queue database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("queue payload serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("queue item not found: {0}")]
    NotFound(QueueItemId),
}

/// Contract for a persistent FIFO work queue
#[async_trait]
pub trait QueuePort<T>: Send + Sync {
    /// Append a payload; returns the new item's id
    async fn enqueue(&self, payload: T) -> Result<QueueItemId, QueueError>;

    /// Claim the oldest pending item, moving it to `Processing`
    async fn dequeue(&self) -> Result<Option<QueueItem<T>>, QueueError>;

    /// Mark an item delivered
    async fn complete(&self, id: QueueItemId) -> Result<(), QueueError>;

    /// Record a failed attempt. The item returns to `Pending` until the
    /// backend's attempt budget runs out, then lands in `Failed`.
    async fn fail(&self, id: QueueItemId, error: &str) -> Result<(), QueueError>;

    /// Number of items still awaiting delivery (pending + processing)
    async fn depth(&self) -> Result<usize, QueueError>;

    /// Drop terminal items older than the given age; returns how many
    async fn cleanup(&self, older_than: std::time::Duration) -> Result<usize, QueueError>;
}
