//! World event DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Event;

/// Event representation returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct EventDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub parent_event_id: Option<i64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

impl From<Event> for EventDto {
    fn from(event: Event) -> Self {
        Self {
            id: event.id.as_i64(),
            name: event.name,
            description: event.description,
            parent_event_id: event.parent_event_id.map(|p| p.as_i64()),
            start_date: event.start_date,
            end_date: event.end_date,
            created_on: event.created_on,
            updated_on: event.updated_on,
        }
    }
}

/// Payload for creating an event
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventRequestDto {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent_event_id: Option<i64>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

/// Payload for updating an event; absent fields are left untouched
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEventRequestDto {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub parent_event_id: Option<Option<i64>>,
    pub start_date: Option<Option<DateTime<Utc>>>,
    pub end_date: Option<Option<DateTime<Utc>>>,
}
