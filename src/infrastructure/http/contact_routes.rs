//! Contact form API routes

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use super::error_response;
use crate::application::dto::{ContactAcceptedDto, ContactRequestDto, QueueStatusDto};
use crate::application::services::ContactService;
use crate::infrastructure::state::AppState;

/// Accept a contact form submission for asynchronous delivery
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ContactRequestDto>,
) -> Result<(StatusCode, Json<ContactAcceptedDto>), (StatusCode, String)> {
    let queued_id = state
        .contact_service
        .submit(req.email, req.message)
        .await
        .map_err(error_response)?;

    Ok((
        StatusCode::ACCEPTED,
        Json(ContactAcceptedDto {
            queued_id: queued_id.to_string(),
        }),
    ))
}

/// Snapshot of the outbound mail queue
pub async fn contact_queue_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<QueueStatusDto>, (StatusCode, String)> {
    let depth = state
        .contact_service
        .queue_depth()
        .await
        .map_err(error_response)?;

    Ok(Json(QueueStatusDto { depth }))
}
