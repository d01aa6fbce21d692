//! Reference data API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::error_response;
use crate::application::dto::{
    AbilityDto, CoinTypeDto, CreateNamedRequestDto, NamedDto, SkillDto,
};
use crate::application::services::ReferenceService;
use crate::domain::value_objects::{ClassId, DamageTypeId, SchoolId};
use crate::infrastructure::state::AppState;

/// List schools of magic
pub async fn list_schools(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<NamedDto>>, (StatusCode, String)> {
    let schools = state
        .reference_service
        .list_schools()
        .await
        .map_err(error_response)?;
    Ok(Json(schools.into_iter().map(NamedDto::from).collect()))
}

/// Create a school of magic
pub async fn create_school(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateNamedRequestDto>,
) -> Result<(StatusCode, Json<NamedDto>), (StatusCode, String)> {
    let school = state
        .reference_service
        .create_school(&req.name)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(NamedDto::from(school))))
}

/// Delete a school of magic
pub async fn delete_school(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .reference_service
        .delete_school(SchoolId::new(id))
        .await
        .map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

/// List damage types
pub async fn list_damage_types(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<NamedDto>>, (StatusCode, String)> {
    let damage_types = state
        .reference_service
        .list_damage_types()
        .await
        .map_err(error_response)?;
    Ok(Json(damage_types.into_iter().map(NamedDto::from).collect()))
}

/// Create a damage type
pub async fn create_damage_type(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateNamedRequestDto>,
) -> Result<(StatusCode, Json<NamedDto>), (StatusCode, String)> {
    let damage_type = state
        .reference_service
        .create_damage_type(&req.name)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(NamedDto::from(damage_type))))
}

/// Delete a damage type
pub async fn delete_damage_type(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .reference_service
        .delete_damage_type(DamageTypeId::new(id))
        .await
        .map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

/// List classes
pub async fn list_classes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<NamedDto>>, (StatusCode, String)> {
    let classes = state
        .reference_service
        .list_classes()
        .await
        .map_err(error_response)?;
    Ok(Json(classes.into_iter().map(NamedDto::from).collect()))
}

/// Create a class
pub async fn create_class(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateNamedRequestDto>,
) -> Result<(StatusCode, Json<NamedDto>), (StatusCode, String)> {
    let class = state
        .reference_service
        .create_class(&req.name)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(NamedDto::from(class))))
}

/// Delete a class
pub async fn delete_class(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .reference_service
        .delete_class(ClassId::new(id))
        .await
        .map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

/// List coin denominations
pub async fn list_coin_types(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CoinTypeDto>>, (StatusCode, String)> {
    let coins = state
        .reference_service
        .list_coin_types()
        .await
        .map_err(error_response)?;
    Ok(Json(coins.into_iter().map(CoinTypeDto::from).collect()))
}

/// List abilities
pub async fn list_abilities(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AbilityDto>>, (StatusCode, String)> {
    let abilities = state
        .reference_service
        .list_abilities()
        .await
        .map_err(error_response)?;
    Ok(Json(abilities.into_iter().map(AbilityDto::from).collect()))
}

/// List skills
pub async fn list_skills(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SkillDto>>, (StatusCode, String)> {
    let skills = state
        .reference_service
        .list_skills()
        .await
        .map_err(error_response)?;
    Ok(Json(skills.into_iter().map(SkillDto::from).collect()))
}
