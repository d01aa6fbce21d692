//! SQLite-backed persistent queue
//!
//! Payloads are stored as JSON in a per-queue table, so pending work
//! survives a restart. Claiming runs inside a transaction; with the
//! single-writer model of SQLite that is enough to keep one worker from
//! stealing another's item.

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::application::ports::outbound::{
    QueueError, QueueItem, QueueItemId, QueueItemStatus, QueuePort,
};

#[derive(FromRow)]
struct QueueRow {
    id: Uuid,
    payload: String,
    status: String,
    attempts: i64,
    last_error: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Persistent FIFO queue over a SQLite table
pub struct SqliteQueue<T> {
    pool: SqlitePool,
    table: String,
    max_attempts: u32,
    _payload: PhantomData<fn() -> T>,
}

impl<T> SqliteQueue<T> {
    /// Create the queue, making its backing table if it does not exist.
    /// `name` must be a valid identifier; it becomes part of the table
    /// name.
    pub async fn new(pool: SqlitePool, name: &str, max_attempts: u32) -> Result<Self, QueueError> {
        let table = format!("queue_{}", name);
        let ddl = format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                id TEXT PRIMARY KEY,
                payload TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending',
                attempts INTEGER NOT NULL DEFAULT 0,
                last_error TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_{table}_status ON {table}(status, created_at);"
        );
        sqlx::raw_sql(&ddl).execute(&pool).await?;

        tracing::debug!(table = %table, max_attempts, "Queue table ready");
        Ok(Self {
            pool,
            table,
            max_attempts,
            _payload: PhantomData,
        })
    }

    fn row_to_item(&self, row: QueueRow) -> Result<QueueItem<T>, QueueError>
    where
        T: DeserializeOwned,
    {
        let payload: T = serde_json::from_str(&row.payload)?;
        Ok(QueueItem {
            id: QueueItemId::from_uuid(row.id),
            payload,
            status: QueueItemStatus::parse(&row.status).unwrap_or(QueueItemStatus::Pending),
            attempts: row.attempts as u32,
            last_error: row.last_error,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl<T> QueuePort<T> for SqliteQueue<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn enqueue(&self, payload: T) -> Result<QueueItemId, QueueError> {
        let id = QueueItemId::new();
        let now = Utc::now();
        let body = serde_json::to_string(&payload)?;

        sqlx::query(&format!(
            "INSERT INTO {} (id, payload, status, attempts, created_at, updated_at)
             VALUES (?, ?, 'pending', 0, ?, ?)",
            self.table
        ))
        .bind(id.as_uuid())
        .bind(body)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        tracing::debug!(item = %id, "Enqueued item");
        Ok(id)
    }

    async fn dequeue(&self) -> Result<Option<QueueItem<T>>, QueueError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, QueueRow>(&format!(
            "SELECT id, payload, status, attempts, last_error, created_at, updated_at
             FROM {} WHERE status = 'pending' ORDER BY created_at LIMIT 1",
            self.table
        ))
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.commit().await?;
            return Ok(None);
        };

        let now = Utc::now();
        sqlx::query(&format!(
            "UPDATE {} SET status = 'processing', updated_at = ? WHERE id = ?",
            self.table
        ))
        .bind(now)
        .bind(row.id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        let mut item = self.row_to_item(row)?;
        item.status = QueueItemStatus::Processing;
        item.updated_at = now;
        Ok(Some(item))
    }

    async fn complete(&self, id: QueueItemId) -> Result<(), QueueError> {
        let result = sqlx::query(&format!(
            "UPDATE {} SET status = 'completed', updated_at = ? WHERE id = ?",
            self.table
        ))
        .bind(Utc::now())
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(QueueError::NotFound(id));
        }
        Ok(())
    }

    async fn fail(&self, id: QueueItemId, error: &str) -> Result<(), QueueError> {
        let mut tx = self.pool.begin().await?;

        let attempts: Option<i64> = sqlx::query_scalar(&format!(
            "SELECT attempts FROM {} WHERE id = ?",
            self.table
        ))
        .bind(id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(attempts) = attempts else {
            return Err(QueueError::NotFound(id));
        };

        let attempts = attempts as u32 + 1;
        let status = if attempts >= self.max_attempts {
            "failed"
        } else {
            "pending"
        };

        sqlx::query(&format!(
            "UPDATE {} SET status = ?, attempts = ?, last_error = ?, updated_at = ? WHERE id = ?",
            self.table
        ))
        .bind(status)
        .bind(attempts as i64)
        .bind(error)
        .bind(Utc::now())
        .bind(id.as_uuid())
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        tracing::warn!(item = %id, attempts, status, "Queue item failed attempt: {}", error);
        Ok(())
    }

    async fn depth(&self) -> Result<usize, QueueError> {
        let count: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM {} WHERE status IN ('pending', 'processing')",
            self.table
        ))
        .fetch_one(&self.pool)
        .await?;
        Ok(count as usize)
    }

    async fn cleanup(&self, older_than: Duration) -> Result<usize, QueueError> {
        let cutoff = Utc::now()
            - chrono::Duration::from_std(older_than)
                .unwrap_or_else(|_| chrono::Duration::hours(24));

        let result = sqlx::query(&format!(
            "DELETE FROM {} WHERE status IN ('completed', 'failed') AND updated_at < ?",
            self.table
        ))
        .bind(cutoff)
        .execute(&self.pool)
        .await?;

        let removed = result.rows_affected() as usize;
        if removed > 0 {
            tracing::info!(removed, "Cleaned up terminal queue items");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::SqliteRepository;
    use serde::Deserialize;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Note {
        text: String,
    }

    async fn queue(max_attempts: u32) -> SqliteQueue<Note> {
        let repository = SqliteRepository::in_memory().await.unwrap();
        SqliteQueue::new(repository.pool().clone(), "notes", max_attempts)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_fifo_claim_and_complete() {
        let queue = queue(3).await;

        queue
            .enqueue(Note {
                text: "first".to_string(),
            })
            .await
            .unwrap();
        queue
            .enqueue(Note {
                text: "second".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(queue.depth().await.unwrap(), 2);

        let item = queue.dequeue().await.unwrap().unwrap();
        assert_eq!(item.payload.text, "first");
        assert_eq!(item.status, QueueItemStatus::Processing);

        queue.complete(item.id).await.unwrap();
        assert_eq!(queue.depth().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_fail_retries_until_budget_spent() {
        let queue = queue(2).await;

        let id = queue
            .enqueue(Note {
                text: "flaky".to_string(),
            })
            .await
            .unwrap();

        // First failure returns the item to pending
        let item = queue.dequeue().await.unwrap().unwrap();
        queue.fail(item.id, "relay down").await.unwrap();
        let retry = queue.dequeue().await.unwrap().unwrap();
        assert_eq!(retry.id, id);
        assert_eq!(retry.attempts, 1);
        assert_eq!(retry.last_error.as_deref(), Some("relay down"));

        // Second failure exhausts the budget
        queue.fail(retry.id, "relay still down").await.unwrap();
        assert!(queue.dequeue().await.unwrap().is_none());
        assert_eq!(queue.depth().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_empty_queue_dequeues_nothing() {
        let queue = queue(3).await;
        assert!(queue.dequeue().await.unwrap().is_none());
        assert_eq!(queue.depth().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_cleanup_drops_only_terminal_items() {
        let queue = queue(3).await;

        let done = queue
            .enqueue(Note {
                text: "done".to_string(),
            })
            .await
            .unwrap();
        queue
            .enqueue(Note {
                text: "waiting".to_string(),
            })
            .await
            .unwrap();

        let item = queue.dequeue().await.unwrap().unwrap();
        assert_eq!(item.id, done);
        queue.complete(done).await.unwrap();

        // Zero age means everything terminal is past the cutoff
        let removed = queue.cleanup(Duration::from_secs(0)).await.unwrap();
        assert_eq!(removed, 1);
        assert_eq!(queue.depth().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_complete_unknown_item_is_not_found() {
        let queue = queue(3).await;
        let err = queue.complete(QueueItemId::new()).await.unwrap_err();
        assert!(matches!(err, QueueError::NotFound(_)));
    }
}
