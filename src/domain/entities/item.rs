//! Item entity

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{CoinTypeId, ItemId};

/// An item of equipment with a price in some coinage
#[derive(Debug, Clone)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: Option<String>,
    /// Weight in pounds
    pub weight: f64,
    pub cost_amount: i64,
    pub coin_type_id: CoinTypeId,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

impl Item {
    /// Normalize the price to copper pieces given the coin's copper value
    pub fn cost_in_copper(&self, coin_value: i64) -> i64 {
        self.cost_amount * coin_value
    }
}

/// Field set for an item that has not been persisted yet
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub description: Option<String>,
    pub weight: f64,
    pub cost_amount: i64,
    pub coin_type_id: CoinTypeId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_in_copper() {
        let item = Item {
            id: ItemId::new(1),
            name: "Longsword".to_string(),
            description: None,
            weight: 3.0,
            cost_amount: 15,
            coin_type_id: CoinTypeId::new(4),
            created_on: Utc::now(),
            updated_on: Utc::now(),
        };
        // 15 gold at 100 copper each
        assert_eq!(item.cost_in_copper(100), 1500);
    }
}
