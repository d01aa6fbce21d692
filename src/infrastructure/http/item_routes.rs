//! Item API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::error_response;
use crate::application::dto::{CreateItemRequestDto, ItemDto, UpdateItemRequestDto};
use crate::application::services::{ItemService, PricedItem, UpdateItemRequest};
use crate::domain::entities::NewItem;
use crate::domain::value_objects::{CoinTypeId, ItemId};
use crate::infrastructure::state::AppState;

fn to_dto(priced: PricedItem) -> ItemDto {
    ItemDto::from_item(priced.item, priced.coin_type.value)
}

/// List items
pub async fn list_items(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ItemDto>>, (StatusCode, String)> {
    let items = state
        .item_service
        .list_items()
        .await
        .map_err(error_response)?;

    Ok(Json(items.into_iter().map(to_dto).collect()))
}

/// Create an item
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateItemRequestDto>,
) -> Result<(StatusCode, Json<ItemDto>), (StatusCode, String)> {
    let new = NewItem {
        name: req.name,
        description: req.description,
        weight: req.weight,
        cost_amount: req.cost_amount,
        coin_type_id: CoinTypeId::new(req.coin_type_id),
    };

    let priced = state
        .item_service
        .create_item(new)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(to_dto(priced))))
}

/// Get an item by ID
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ItemDto>, (StatusCode, String)> {
    let priced = state
        .item_service
        .get_item(ItemId::new(id))
        .await
        .map_err(error_response)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Item not found".to_string()))?;

    Ok(Json(to_dto(priced)))
}

/// Update an item
pub async fn update_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateItemRequestDto>,
) -> Result<Json<ItemDto>, (StatusCode, String)> {
    let request = UpdateItemRequest {
        name: req.name,
        description: req.description,
        weight: req.weight,
        cost_amount: req.cost_amount,
        coin_type_id: req.coin_type_id.map(CoinTypeId::new),
    };

    let priced = state
        .item_service
        .update_item(ItemId::new(id), request)
        .await
        .map_err(error_response)?;

    Ok(Json(to_dto(priced)))
}

/// Delete an item
pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .item_service
        .delete_item(ItemId::new(id))
        .await
        .map_err(error_response)?;

    Ok(StatusCode::NO_CONTENT)
}
