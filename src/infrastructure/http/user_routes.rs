//! User account API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::error_response;
use crate::application::dto::{CreateUserRequestDto, UpdateUserRequestDto, UserDto};
use crate::application::services::{AccountService, UpdateUserRequest};
use crate::domain::entities::NewUser;
use crate::domain::value_objects::UserId;
use crate::infrastructure::state::AppState;

/// List users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserDto>>, (StatusCode, String)> {
    let users = state
        .account_service
        .list_users()
        .await
        .map_err(error_response)?;

    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

/// Register a user
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequestDto>,
) -> Result<(StatusCode, Json<UserDto>), (StatusCode, String)> {
    let new = NewUser {
        username: req.username,
        email_address: req.email_address,
        role: req.role,
    };

    let user = state
        .account_service
        .create_user(new)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(UserDto::from(user))))
}

/// Get a user by ID
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<UserDto>, (StatusCode, String)> {
    let user = state
        .account_service
        .get_user(UserId::new(id))
        .await
        .map_err(error_response)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "User not found".to_string()))?;

    Ok(Json(UserDto::from(user)))
}

/// Update a user
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequestDto>,
) -> Result<Json<UserDto>, (StatusCode, String)> {
    let request = UpdateUserRequest {
        username: req.username,
        email_address: req.email_address,
        role: req.role,
        is_active: req.is_active,
    };

    let user = state
        .account_service
        .update_user(UserId::new(id), request)
        .await
        .map_err(error_response)?;

    Ok(Json(UserDto::from(user)))
}

/// Delete a user
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .account_service
        .delete_user(UserId::new(id))
        .await
        .map_err(error_response)?;

    Ok(StatusCode::NO_CONTENT)
}
