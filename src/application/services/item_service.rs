//! Item service - application use cases for equipment

use anyhow::Result;
use async_trait::async_trait;
use tracing::instrument;

use crate::domain::entities::{CoinType, Item, NewItem};
use crate::domain::value_objects::{CoinTypeId, ItemId};
use crate::infrastructure::persistence::SqliteRepository;

/// Request to update an existing item. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub weight: Option<f64>,
    pub cost_amount: Option<i64>,
    pub coin_type_id: Option<CoinTypeId>,
}

/// An item paired with its coinage, so callers can normalize the price
#[derive(Debug, Clone)]
pub struct PricedItem {
    pub item: Item,
    pub coin_type: CoinType,
}

/// Item service trait defining the application use cases
#[async_trait]
pub trait ItemService: Send + Sync {
    /// Create a new item
    async fn create_item(&self, new: NewItem) -> Result<PricedItem>;

    /// Get an item by ID, with its coin type
    async fn get_item(&self, id: ItemId) -> Result<Option<PricedItem>>;

    /// List all items with their coin types
    async fn list_items(&self) -> Result<Vec<PricedItem>>;

    /// Update an item
    async fn update_item(&self, id: ItemId, request: UpdateItemRequest) -> Result<PricedItem>;

    /// Delete an item
    async fn delete_item(&self, id: ItemId) -> Result<()>;
}

/// Default implementation of ItemService using the SQLite repository
pub struct ItemServiceImpl {
    repository: SqliteRepository,
}

impl ItemServiceImpl {
    pub fn new(repository: SqliteRepository) -> Self {
        Self { repository }
    }

    fn validate_item(name: &str, weight: f64, cost_amount: i64) -> Result<()> {
        if name.trim().is_empty() {
            anyhow::bail!("Item name cannot be empty");
        }
        if name.len() > 256 {
            anyhow::bail!("Item name cannot exceed 256 characters");
        }
        if !weight.is_finite() || weight < 0.0 {
            anyhow::bail!("Item weight cannot be negative");
        }
        if cost_amount < 0 {
            anyhow::bail!("Item cost cannot be negative");
        }
        Ok(())
    }

    async fn coin_type(&self, id: CoinTypeId) -> Result<CoinType> {
        self.repository
            .reference()
            .get_coin_type(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Coin type not found: {}", id))
    }
}

#[async_trait]
impl ItemService for ItemServiceImpl {
    #[instrument(skip(self, new), fields(name = %new.name))]
    async fn create_item(&self, new: NewItem) -> Result<PricedItem> {
        Self::validate_item(&new.name, new.weight, new.cost_amount)?;
        let coin_type = self.coin_type(new.coin_type_id).await?;

        let item = self.repository.items().create(new).await?;
        Ok(PricedItem { item, coin_type })
    }

    #[instrument(skip(self))]
    async fn get_item(&self, id: ItemId) -> Result<Option<PricedItem>> {
        let Some(item) = self.repository.items().get(id).await? else {
            return Ok(None);
        };
        let coin_type = self.coin_type(item.coin_type_id).await?;
        Ok(Some(PricedItem { item, coin_type }))
    }

    #[instrument(skip(self))]
    async fn list_items(&self) -> Result<Vec<PricedItem>> {
        let coin_types = self.repository.reference().list_coin_types().await?;
        let items = self.repository.items().list().await?;

        let mut priced = Vec::with_capacity(items.len());
        for item in items {
            let coin_type = coin_types
                .iter()
                .find(|c| c.id == item.coin_type_id)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("Coin type not found: {}", item.coin_type_id))?;
            priced.push(PricedItem { item, coin_type });
        }
        Ok(priced)
    }

    #[instrument(skip(self, request))]
    async fn update_item(&self, id: ItemId, request: UpdateItemRequest) -> Result<PricedItem> {
        let mut item = self
            .repository
            .items()
            .get(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Item not found: {}", id))?;

        if let Some(name) = request.name {
            item.name = name;
        }
        if let Some(description) = request.description {
            item.description = description;
        }
        if let Some(weight) = request.weight {
            item.weight = weight;
        }
        if let Some(cost_amount) = request.cost_amount {
            item.cost_amount = cost_amount;
        }
        if let Some(coin_type_id) = request.coin_type_id {
            item.coin_type_id = coin_type_id;
        }

        Self::validate_item(&item.name, item.weight, item.cost_amount)?;
        let coin_type = self.coin_type(item.coin_type_id).await?;

        self.repository.items().update(&item).await?;
        Ok(PricedItem { item, coin_type })
    }

    #[instrument(skip(self))]
    async fn delete_item(&self, id: ItemId) -> Result<()> {
        if !self.repository.items().delete(id).await? {
            anyhow::bail!("Item not found: {}", id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_negative_weight_and_cost() {
        assert!(ItemServiceImpl::validate_item("Rope", -1.0, 1).is_err());
        assert!(ItemServiceImpl::validate_item("Rope", 10.0, -1).is_err());
        assert!(ItemServiceImpl::validate_item("Rope", f64::NAN, 1).is_err());
        assert!(ItemServiceImpl::validate_item("Rope", 10.0, 1).is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        assert!(ItemServiceImpl::validate_item("", 1.0, 1).is_err());
    }
}
