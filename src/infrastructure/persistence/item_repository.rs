//! Item repository

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use super::map_insert_error;
use crate::domain::entities::{Item, NewItem};
use crate::domain::value_objects::{CoinTypeId, ItemId};

#[derive(FromRow)]
struct ItemRow {
    id: i64,
    name: String,
    description: Option<String>,
    weight: f64,
    cost_amount: i64,
    coin_type_id: i64,
    created_on: DateTime<Utc>,
    updated_on: DateTime<Utc>,
}

fn item_from_row(row: ItemRow) -> Item {
    Item {
        id: ItemId::new(row.id),
        name: row.name,
        description: row.description,
        weight: row.weight,
        cost_amount: row.cost_amount,
        coin_type_id: CoinTypeId::new(row.coin_type_id),
        created_on: row.created_on,
        updated_on: row.updated_on,
    }
}

const ITEM_COLUMNS: &str =
    "id, name, description, weight, cost_amount, coin_type_id, created_on, updated_on";

/// Repository for equipment items
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewItem) -> Result<Item> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO item
             (name, description, weight, cost_amount, coin_type_id, created_on, updated_on)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.weight)
        .bind(new.cost_amount)
        .bind(new.coin_type_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "item", &new.name))?;

        tracing::debug!("Created item: {}", new.name);
        Ok(Item {
            id: ItemId::new(result.last_insert_rowid()),
            name: new.name,
            description: new.description,
            weight: new.weight,
            cost_amount: new.cost_amount,
            coin_type_id: new.coin_type_id,
            created_on: now,
            updated_on: now,
        })
    }

    pub async fn get(&self, id: ItemId) -> Result<Option<Item>> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {} FROM item WHERE id = ?",
            ITEM_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(item_from_row))
    }

    pub async fn list(&self) -> Result<Vec<Item>> {
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {} FROM item ORDER BY name",
            ITEM_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(item_from_row).collect())
    }

    pub async fn update(&self, item: &Item) -> Result<()> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE item SET name = ?, description = ?, weight = ?,
                 cost_amount = ?, coin_type_id = ?, updated_on = ?
             WHERE id = ?",
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.weight)
        .bind(item.cost_amount)
        .bind(item.coin_type_id)
        .bind(now)
        .bind(item.id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "item", &item.name))?;

        if result.rows_affected() == 0 {
            anyhow::bail!("item not found: {}", item.id);
        }
        Ok(())
    }

    pub async fn delete(&self, id: ItemId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM item WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::{seed_reference_data, SqliteRepository};

    async fn seeded() -> SqliteRepository {
        let repository = SqliteRepository::in_memory().await.unwrap();
        seed_reference_data(&repository).await.unwrap();
        repository
    }

    async fn gold_id(repository: &SqliteRepository) -> CoinTypeId {
        repository
            .reference()
            .list_coin_types()
            .await
            .unwrap()
            .into_iter()
            .find(|c| c.abbreviation == "gp")
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_create_and_fetch() {
        let repository = seeded().await;
        let items = repository.items();
        let gold = gold_id(&repository).await;

        let created = items
            .create(NewItem {
                name: "Longsword".to_string(),
                description: Some("Versatile (1d10)".to_string()),
                weight: 3.0,
                cost_amount: 15,
                coin_type_id: gold,
            })
            .await
            .unwrap();

        let fetched = items.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Longsword");
        assert_eq!(fetched.cost_amount, 15);
        assert_eq!(fetched.coin_type_id, gold);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_conflict() {
        let repository = seeded().await;
        let items = repository.items();
        let gold = gold_id(&repository).await;

        let new = NewItem {
            name: "Shield".to_string(),
            description: None,
            weight: 6.0,
            cost_amount: 10,
            coin_type_id: gold,
        };
        items.create(new.clone()).await.unwrap();
        let err = items.create(new).await.unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_update_refreshes_timestamp() {
        let repository = seeded().await;
        let items = repository.items();
        let gold = gold_id(&repository).await;

        let mut item = items
            .create(NewItem {
                name: "Rope".to_string(),
                description: None,
                weight: 10.0,
                cost_amount: 1,
                coin_type_id: gold,
            })
            .await
            .unwrap();

        item.cost_amount = 2;
        items.update(&item).await.unwrap();

        let fetched = items.get(item.id).await.unwrap().unwrap();
        assert_eq!(fetched.cost_amount, 2);
        assert!(fetched.updated_on >= fetched.created_on);
    }
}
