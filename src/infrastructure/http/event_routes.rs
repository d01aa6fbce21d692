//! World event API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::error_response;
use crate::application::dto::{CreateEventRequestDto, EventDto, UpdateEventRequestDto};
use crate::application::services::{EventService, UpdateEventRequest};
use crate::domain::entities::NewEvent;
use crate::domain::value_objects::EventId;
use crate::infrastructure::state::AppState;

/// List events
pub async fn list_events(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<EventDto>>, (StatusCode, String)> {
    let events = state
        .event_service
        .list_events()
        .await
        .map_err(error_response)?;

    Ok(Json(events.into_iter().map(EventDto::from).collect()))
}

/// Create an event
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateEventRequestDto>,
) -> Result<(StatusCode, Json<EventDto>), (StatusCode, String)> {
    let new = NewEvent {
        name: req.name,
        description: req.description,
        parent_event_id: req.parent_event_id.map(EventId::new),
        start_date: req.start_date,
        end_date: req.end_date,
    };

    let event = state
        .event_service
        .create_event(new)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(EventDto::from(event))))
}

/// Get an event by ID
pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<EventDto>, (StatusCode, String)> {
    let event = state
        .event_service
        .get_event(EventId::new(id))
        .await
        .map_err(error_response)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Event not found".to_string()))?;

    Ok(Json(EventDto::from(event)))
}

/// List the direct children of an event
pub async fn list_children(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<EventDto>>, (StatusCode, String)> {
    let children = state
        .event_service
        .list_children(EventId::new(id))
        .await
        .map_err(error_response)?;

    Ok(Json(children.into_iter().map(EventDto::from).collect()))
}

/// Update an event
pub async fn update_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateEventRequestDto>,
) -> Result<Json<EventDto>, (StatusCode, String)> {
    let request = UpdateEventRequest {
        name: req.name,
        description: req.description,
        parent_event_id: req
            .parent_event_id
            .map(|parent| parent.map(EventId::new)),
        start_date: req.start_date,
        end_date: req.end_date,
    };

    let event = state
        .event_service
        .update_event(EventId::new(id), request)
        .await
        .map_err(error_response)?;

    Ok(Json(EventDto::from(event)))
}

/// Delete an event; children are re-parented to the root
pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .event_service
        .delete_event(EventId::new(id))
        .await
        .map_err(error_response)?;

    Ok(StatusCode::NO_CONTENT)
}
