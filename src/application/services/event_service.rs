//! Event service - application use cases for the world timeline

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::instrument;

use crate::domain::entities::{Event, NewEvent};
use crate::domain::value_objects::EventId;
use crate::infrastructure::persistence::SqliteRepository;

/// Request to update an existing event. `None` leaves a field untouched;
/// the nested options clear nullable fields when `Some(None)`.
#[derive(Debug, Clone, Default)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub parent_event_id: Option<Option<EventId>>,
    pub start_date: Option<Option<DateTime<Utc>>>,
    pub end_date: Option<Option<DateTime<Utc>>>,
}

/// Event service trait defining the application use cases
#[async_trait]
pub trait EventService: Send + Sync {
    /// Create a new event
    async fn create_event(&self, new: NewEvent) -> Result<Event>;

    /// Get an event by ID
    async fn get_event(&self, id: EventId) -> Result<Option<Event>>;

    /// List all events
    async fn list_events(&self) -> Result<Vec<Event>>;

    /// List the direct children of an event
    async fn list_children(&self, id: EventId) -> Result<Vec<Event>>;

    /// Update an event
    async fn update_event(&self, id: EventId, request: UpdateEventRequest) -> Result<Event>;

    /// Delete an event; its children are re-parented to the root
    async fn delete_event(&self, id: EventId) -> Result<()>;
}

/// Default implementation of EventService using the SQLite repository
pub struct EventServiceImpl {
    repository: SqliteRepository,
}

impl EventServiceImpl {
    pub fn new(repository: SqliteRepository) -> Self {
        Self { repository }
    }

    fn validate_event(
        name: &str,
        description: Option<&str>,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> Result<()> {
        if name.trim().is_empty() {
            anyhow::bail!("Event name cannot be empty");
        }
        if name.len() > 255 {
            anyhow::bail!("Event name cannot exceed 255 characters");
        }
        if description.is_some_and(|d| d.len() > 4096) {
            anyhow::bail!("Event description cannot exceed 4096 characters");
        }
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                anyhow::bail!("Event end date cannot precede its start date");
            }
        }
        Ok(())
    }

    async fn ensure_parent_exists(&self, parent_id: EventId) -> Result<()> {
        self.repository
            .events()
            .get(parent_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Parent event not found: {}", parent_id))?;
        Ok(())
    }

    /// Walks the ancestor chain of `parent_id` and rejects the move if
    /// `id` appears in it. Also verifies the parent itself exists.
    async fn ensure_not_descendant(&self, id: EventId, parent_id: EventId) -> Result<()> {
        let mut current = Some(parent_id);
        while let Some(ancestor_id) = current {
            if ancestor_id == id {
                anyhow::bail!("An event cannot be nested under its own descendant");
            }
            current = self
                .repository
                .events()
                .get(ancestor_id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("Parent event not found: {}", ancestor_id))?
                .parent_event_id;
        }
        Ok(())
    }
}

#[async_trait]
impl EventService for EventServiceImpl {
    #[instrument(skip(self, new), fields(name = %new.name))]
    async fn create_event(&self, new: NewEvent) -> Result<Event> {
        Self::validate_event(
            &new.name,
            new.description.as_deref(),
            new.start_date,
            new.end_date,
        )?;
        if let Some(parent_id) = new.parent_event_id {
            self.ensure_parent_exists(parent_id).await?;
        }

        self.repository.events().create(new).await
    }

    #[instrument(skip(self))]
    async fn get_event(&self, id: EventId) -> Result<Option<Event>> {
        self.repository.events().get(id).await
    }

    #[instrument(skip(self))]
    async fn list_events(&self) -> Result<Vec<Event>> {
        self.repository.events().list().await
    }

    #[instrument(skip(self))]
    async fn list_children(&self, id: EventId) -> Result<Vec<Event>> {
        self.ensure_parent_exists(id).await?;
        self.repository.events().list_children(id).await
    }

    #[instrument(skip(self, request))]
    async fn update_event(&self, id: EventId, request: UpdateEventRequest) -> Result<Event> {
        let mut event = self
            .repository
            .events()
            .get(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Event not found: {}", id))?;

        if let Some(name) = request.name {
            event.name = name;
        }
        if let Some(description) = request.description {
            event.description = description;
        }
        if let Some(parent_event_id) = request.parent_event_id {
            if let Some(parent_id) = parent_event_id {
                if parent_id == id {
                    anyhow::bail!("An event cannot be its own parent");
                }
                self.ensure_not_descendant(id, parent_id).await?;
            }
            event.parent_event_id = parent_event_id;
        }
        if let Some(start_date) = request.start_date {
            event.start_date = start_date;
        }
        if let Some(end_date) = request.end_date {
            event.end_date = end_date;
        }

        Self::validate_event(
            &event.name,
            event.description.as_deref(),
            event.start_date,
            event.end_date,
        )?;

        self.repository.events().update(&event).await?;
        Ok(event)
    }

    #[instrument(skip(self))]
    async fn delete_event(&self, id: EventId) -> Result<()> {
        if !self.repository.events().delete(id).await? {
            anyhow::bail!("Event not found: {}", id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_validate_rejects_inverted_date_range() {
        let start = Utc.with_ymd_and_hms(1200, 6, 1, 0, 0, 0).single();
        let end = Utc.with_ymd_and_hms(1199, 6, 1, 0, 0, 0).single();
        let err = EventServiceImpl::validate_event("War of Ash", None, start, end).unwrap_err();
        assert!(err.to_string().contains("end date"));
    }

    #[test]
    fn test_validate_accepts_open_ended_event() {
        let start = Utc.with_ymd_and_hms(1200, 6, 1, 0, 0, 0).single();
        assert!(EventServiceImpl::validate_event("War of Ash", None, start, None).is_ok());
        assert!(EventServiceImpl::validate_event("Undated Era", None, None, None).is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        assert!(EventServiceImpl::validate_event("   ", None, None, None).is_err());
    }

    #[test]
    fn test_validate_length_limits() {
        let name = "x".repeat(255);
        assert!(EventServiceImpl::validate_event(&name, None, None, None).is_ok());
        let name = "x".repeat(256);
        assert!(EventServiceImpl::validate_event(&name, None, None, None).is_err());

        let description = "d".repeat(4096);
        assert!(EventServiceImpl::validate_event("Era", Some(&description), None, None).is_ok());
        let description = "d".repeat(4097);
        let err = EventServiceImpl::validate_event("Era", Some(&description), None, None)
            .unwrap_err();
        assert!(err.to_string().contains("description"));
    }

    async fn create_named(
        service: &EventServiceImpl,
        name: &str,
        parent: Option<EventId>,
    ) -> Event {
        service
            .create_event(NewEvent {
                name: name.to_string(),
                description: None,
                parent_event_id: parent,
                start_date: None,
                end_date: None,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_update_rejects_reparenting_under_descendant() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        let service = EventServiceImpl::new(repository);

        let founding = create_named(&service, "Founding", None).await;
        let schism = create_named(&service, "Schism", Some(founding.id)).await;
        let exile = create_named(&service, "Exile", Some(schism.id)).await;

        // Direct child and grandchild are both rejected as new parents
        for parent in [schism.id, exile.id] {
            let err = service
                .update_event(
                    founding.id,
                    UpdateEventRequest {
                        parent_event_id: Some(Some(parent)),
                        ..Default::default()
                    },
                )
                .await
                .unwrap_err();
            assert!(err.to_string().contains("descendant"));
        }

        // The tree is unchanged
        let fetched = service.get_event(founding.id).await.unwrap().unwrap();
        assert_eq!(fetched.parent_event_id, None);

        // Moving a leaf to the root is still fine
        service
            .update_event(
                exile.id,
                UpdateEventRequest {
                    parent_event_id: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_rejects_self_parent() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        let service = EventServiceImpl::new(repository);

        let era = create_named(&service, "Era of Frost", None).await;
        let err = service
            .update_event(
                era.id,
                UpdateEventRequest {
                    parent_event_id: Some(Some(era.id)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("own parent"));
    }
}
