//! World timeline events

use chrono::{DateTime, Utc};

use crate::domain::value_objects::EventId;

/// A world event. Events form a tree via `parent_event_id`; dates are
/// stored timezone-aware.
#[derive(Debug, Clone)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub description: Option<String>,
    pub parent_event_id: Option<EventId>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

/// Field set for an event that has not been persisted yet
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub description: Option<String>,
    pub parent_event_id: Option<EventId>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}
