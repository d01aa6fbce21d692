//! Item DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Item;

/// Item representation returned by the API. `cost_in_copper` is derived
/// from the coin type's copper value at read time.
#[derive(Debug, Clone, Serialize)]
pub struct ItemDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub weight: f64,
    pub cost_amount: i64,
    pub coin_type_id: i64,
    pub cost_in_copper: i64,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

impl ItemDto {
    pub fn from_item(item: Item, coin_value: i64) -> Self {
        Self {
            id: item.id.as_i64(),
            cost_in_copper: item.cost_in_copper(coin_value),
            name: item.name,
            description: item.description,
            weight: item.weight,
            cost_amount: item.cost_amount,
            coin_type_id: item.coin_type_id.as_i64(),
            created_on: item.created_on,
            updated_on: item.updated_on,
        }
    }
}

/// Payload for creating an item
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItemRequestDto {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub weight: f64,
    pub cost_amount: i64,
    pub coin_type_id: i64,
}

/// Payload for updating an item; absent fields are left untouched
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateItemRequestDto {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub weight: Option<f64>,
    pub cost_amount: Option<i64>,
    pub coin_type_id: Option<i64>,
}
