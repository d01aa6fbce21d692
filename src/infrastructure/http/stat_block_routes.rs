//! Stat block API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::error_response;
use crate::application::dto::{
    CharacterSheetDto, CreateStatBlockRequestDto, SetClassLevelsRequestDto, StatBlockDto,
};
use crate::application::services::{StatBlockService, UpdateStatBlockRequest};
use crate::domain::entities::{ClassLevel, NewStatBlock};
use crate::domain::value_objects::{ClassId, StatBlockId};
use crate::infrastructure::state::AppState;

/// List stat blocks
pub async fn list_stat_blocks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StatBlockDto>>, (StatusCode, String)> {
    let blocks = state
        .stat_block_service
        .list_stat_blocks()
        .await
        .map_err(error_response)?;

    Ok(Json(blocks.into_iter().map(StatBlockDto::from).collect()))
}

/// Create a stat block
pub async fn create_stat_block(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateStatBlockRequestDto>,
) -> Result<(StatusCode, Json<StatBlockDto>), (StatusCode, String)> {
    let block = state
        .stat_block_service
        .create_stat_block(NewStatBlock::from(req))
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(StatBlockDto::from(block))))
}

/// Get a stat block by ID
pub async fn get_stat_block(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<StatBlockDto>, (StatusCode, String)> {
    let block = state
        .stat_block_service
        .get_stat_block(StatBlockId::new(id))
        .await
        .map_err(error_response)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Stat block not found".to_string()))?;

    Ok(Json(StatBlockDto::from(block)))
}

/// Replace a stat block's stored fields
pub async fn update_stat_block(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<CreateStatBlockRequestDto>,
) -> Result<Json<StatBlockDto>, (StatusCode, String)> {
    let new = NewStatBlock::from(req);
    let request = UpdateStatBlockRequest {
        name: Some(new.name),
        race_id: Some(new.race_id),
        abilities: Some(new.abilities),
        skills: Some(new.skills),
        saving_throws: Some(new.saving_throws),
        armor_bonuses: Some(new.armor_bonuses),
    };

    let block = state
        .stat_block_service
        .update_stat_block(StatBlockId::new(id), request)
        .await
        .map_err(error_response)?;

    Ok(Json(StatBlockDto::from(block)))
}

/// Replace a stat block's class levels
pub async fn set_class_levels(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<SetClassLevelsRequestDto>,
) -> Result<Json<StatBlockDto>, (StatusCode, String)> {
    let classes = req
        .classes
        .into_iter()
        .map(|c| ClassLevel {
            class_id: ClassId::new(c.class_id),
            level: c.level,
        })
        .collect();

    let block = state
        .stat_block_service
        .set_class_levels(StatBlockId::new(id), classes)
        .await
        .map_err(error_response)?;

    Ok(Json(StatBlockDto::from(block)))
}

/// Get the derived character sheet for a stat block
pub async fn get_character_sheet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<CharacterSheetDto>, (StatusCode, String)> {
    let sheet = state
        .stat_block_service
        .character_sheet(StatBlockId::new(id))
        .await
        .map_err(error_response)?;

    Ok(Json(CharacterSheetDto::from(sheet)))
}

/// Delete a stat block
pub async fn delete_stat_block(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .stat_block_service
        .delete_stat_block(StatBlockId::new(id))
        .await
        .map_err(error_response)?;

    Ok(StatusCode::NO_CONTENT)
}
