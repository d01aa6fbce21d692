//! World event repository
//!
//! Events form a tree through `parent_event_id`. Deleting a node
//! re-parents its children to the root in the same transaction, so the
//! tree never dangles.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use super::map_insert_error;
use crate::domain::entities::{Event, NewEvent};
use crate::domain::value_objects::EventId;

#[derive(FromRow)]
struct EventRow {
    id: i64,
    name: String,
    description: Option<String>,
    parent_event_id: Option<i64>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    created_on: DateTime<Utc>,
    updated_on: DateTime<Utc>,
}

fn event_from_row(row: EventRow) -> Event {
    Event {
        id: EventId::new(row.id),
        name: row.name,
        description: row.description,
        parent_event_id: row.parent_event_id.map(EventId::new),
        start_date: row.start_date,
        end_date: row.end_date,
        created_on: row.created_on,
        updated_on: row.updated_on,
    }
}

const EVENT_COLUMNS: &str =
    "id, name, description, parent_event_id, start_date, end_date, created_on, updated_on";

/// Repository for world events
pub struct EventRepository {
    pool: SqlitePool,
}

impl EventRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewEvent) -> Result<Event> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO event
             (name, description, parent_event_id, start_date, end_date, created_on, updated_on)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.parent_event_id)
        .bind(new.start_date)
        .bind(new.end_date)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "event", &new.name))?;

        tracing::debug!("Created event: {}", new.name);
        Ok(Event {
            id: EventId::new(result.last_insert_rowid()),
            name: new.name,
            description: new.description,
            parent_event_id: new.parent_event_id,
            start_date: new.start_date,
            end_date: new.end_date,
            created_on: now,
            updated_on: now,
        })
    }

    pub async fn get(&self, id: EventId) -> Result<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {} FROM event WHERE id = ?",
            EVENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(event_from_row))
    }

    pub async fn list(&self) -> Result<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {} FROM event ORDER BY start_date, name",
            EVENT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(event_from_row).collect())
    }

    /// Direct children of an event
    pub async fn list_children(&self, id: EventId) -> Result<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {} FROM event WHERE parent_event_id = ? ORDER BY start_date, name",
            EVENT_COLUMNS
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(event_from_row).collect())
    }

    pub async fn update(&self, event: &Event) -> Result<()> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE event SET name = ?, description = ?, parent_event_id = ?,
                 start_date = ?, end_date = ?, updated_on = ?
             WHERE id = ?",
        )
        .bind(&event.name)
        .bind(&event.description)
        .bind(event.parent_event_id)
        .bind(event.start_date)
        .bind(event.end_date)
        .bind(now)
        .bind(event.id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "event", &event.name))?;

        if result.rows_affected() == 0 {
            anyhow::bail!("event not found: {}", event.id);
        }
        Ok(())
    }

    /// Delete an event, re-parenting its children to the root
    pub async fn delete(&self, id: EventId) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE event SET parent_event_id = NULL WHERE parent_event_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM event WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::SqliteRepository;

    fn new_event(name: &str, parent: Option<EventId>) -> NewEvent {
        NewEvent {
            name: name.to_string(),
            description: None,
            parent_event_id: parent,
            start_date: Some(Utc::now()),
            end_date: None,
        }
    }

    #[tokio::test]
    async fn test_tree_listing() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        let events = repository.events();

        let age = events.create(new_event("Age of Dragons", None)).await.unwrap();
        events
            .create(new_event("The First Flight", Some(age.id)))
            .await
            .unwrap();
        events
            .create(new_event("The Long Burning", Some(age.id)))
            .await
            .unwrap();

        let children = events.list_children(age.id).await.unwrap();
        assert_eq!(children.len(), 2);
        assert!(children.iter().all(|c| c.parent_event_id == Some(age.id)));
    }

    #[tokio::test]
    async fn test_delete_reparents_children() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        let events = repository.events();

        let parent = events.create(new_event("Parent", None)).await.unwrap();
        let child = events
            .create(new_event("Child", Some(parent.id)))
            .await
            .unwrap();

        assert!(events.delete(parent.id).await.unwrap());
        let orphan = events.get(child.id).await.unwrap().unwrap();
        assert_eq!(orphan.parent_event_id, None);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_conflict() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        let events = repository.events();

        events.create(new_event("The Fall", None)).await.unwrap();
        let err = events.create(new_event("The Fall", None)).await.unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
