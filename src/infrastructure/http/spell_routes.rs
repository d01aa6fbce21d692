//! Spell API routes

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::error_response;
use crate::application::dto::{CreateSpellRequestDto, SpellDto, SpellFilterDto, UpdateSpellRequestDto};
use crate::application::services::{SpellFilter, SpellService, UpdateSpellRequest};
use crate::domain::entities::NewSpell;
use crate::domain::value_objects::{ClassId, ComponentType, DamageTypeId, SchoolId, SpellId};
use crate::infrastructure::state::AppState;

fn parse_components(codes: &[String]) -> Result<Vec<ComponentType>, (StatusCode, String)> {
    codes
        .iter()
        .map(|code| {
            ComponentType::parse(code).ok_or_else(|| {
                (
                    StatusCode::BAD_REQUEST,
                    format!("Unknown spell component: {}", code),
                )
            })
        })
        .collect()
}

/// List spells, optionally filtered by query parameters
pub async fn list_spells(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<SpellFilterDto>,
) -> Result<Json<Vec<SpellDto>>, (StatusCode, String)> {
    let filter = SpellFilter {
        level: filter.level,
        school_id: filter.school_id.map(SchoolId::new),
        class_id: filter.class_id.map(ClassId::new),
        ritual: filter.ritual,
        name: filter.name,
    };

    let spells = state
        .spell_service
        .list_spells(filter)
        .await
        .map_err(error_response)?;

    Ok(Json(spells.into_iter().map(SpellDto::from).collect()))
}

/// Create a spell
pub async fn create_spell(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateSpellRequestDto>,
) -> Result<(StatusCode, Json<SpellDto>), (StatusCode, String)> {
    let components = parse_components(&req.components)?;

    let new = NewSpell {
        name: req.name,
        ritual: req.ritual,
        level: req.level,
        school_id: SchoolId::new(req.school_id),
        casting_time: req.casting_time,
        range: req.range,
        components,
        material_components: req.material_components,
        description: req.description,
        higher_levels: req.higher_levels,
        classes: req.class_ids.into_iter().map(ClassId::new).collect(),
        damage_types: req.damage_type_ids.into_iter().map(DamageTypeId::new).collect(),
    };

    let spell = state
        .spell_service
        .create_spell(new)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(SpellDto::from(spell))))
}

/// Get a spell by ID
pub async fn get_spell(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SpellDto>, (StatusCode, String)> {
    let spell = state
        .spell_service
        .get_spell(SpellId::new(id))
        .await
        .map_err(error_response)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Spell not found".to_string()))?;

    Ok(Json(SpellDto::from(spell)))
}

/// Update a spell
pub async fn update_spell(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateSpellRequestDto>,
) -> Result<Json<SpellDto>, (StatusCode, String)> {
    let components = match req.components {
        Some(codes) => Some(parse_components(&codes)?),
        None => None,
    };

    let request = UpdateSpellRequest {
        name: req.name,
        ritual: req.ritual,
        level: req.level,
        school_id: req.school_id.map(SchoolId::new),
        casting_time: req.casting_time,
        range: req.range,
        components,
        material_components: req.material_components,
        description: req.description,
        higher_levels: req.higher_levels,
        classes: req
            .class_ids
            .map(|ids| ids.into_iter().map(ClassId::new).collect()),
        damage_types: req
            .damage_type_ids
            .map(|ids| ids.into_iter().map(DamageTypeId::new).collect()),
    };

    let spell = state
        .spell_service
        .update_spell(SpellId::new(id), request)
        .await
        .map_err(error_response)?;

    Ok(Json(SpellDto::from(spell)))
}

/// Delete a spell
pub async fn delete_spell(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .spell_service
        .delete_spell(SpellId::new(id))
        .await
        .map_err(error_response)?;

    Ok(StatusCode::NO_CONTENT)
}
