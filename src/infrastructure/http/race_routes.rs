//! Race API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::error_response;
use crate::application::dto::{CreateRaceRequestDto, RaceDto};
use crate::application::services::{RaceService, UpdateRaceRequest};
use crate::domain::entities::NewRace;
use crate::domain::value_objects::RaceId;
use crate::infrastructure::state::AppState;

/// List races
pub async fn list_races(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RaceDto>>, (StatusCode, String)> {
    let races = state
        .race_service
        .list_races()
        .await
        .map_err(error_response)?;

    Ok(Json(races.into_iter().map(RaceDto::from).collect()))
}

/// Create a race
pub async fn create_race(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateRaceRequestDto>,
) -> Result<(StatusCode, Json<RaceDto>), (StatusCode, String)> {
    let race = state
        .race_service
        .create_race(NewRace::from(req))
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(RaceDto::from(race))))
}

/// Get a race by ID
pub async fn get_race(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<RaceDto>, (StatusCode, String)> {
    let race = state
        .race_service
        .get_race(RaceId::new(id))
        .await
        .map_err(error_response)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Race not found".to_string()))?;

    Ok(Json(RaceDto::from(race)))
}

/// Replace a race's stored fields
pub async fn update_race(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<CreateRaceRequestDto>,
) -> Result<Json<RaceDto>, (StatusCode, String)> {
    let new = NewRace::from(req);
    let request = UpdateRaceRequest {
        name: Some(new.name),
        description: Some(new.description),
        speed: Some(new.speed),
        ability_bonuses: Some(new.ability_bonuses),
    };

    let race = state
        .race_service
        .update_race(RaceId::new(id), request)
        .await
        .map_err(error_response)?;

    Ok(Json(RaceDto::from(race)))
}

/// Delete a race
pub async fn delete_race(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .race_service
        .delete_race(RaceId::new(id))
        .await
        .map_err(error_response)?;

    Ok(StatusCode::NO_CONTENT)
}
