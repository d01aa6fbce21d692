//! Race repository
//!
//! Ability score increases live in `race_ability_bonus` child rows and
//! are replaced wholesale on update inside a transaction.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, Sqlite, SqlitePool, Transaction};

use super::map_insert_error;
use crate::domain::entities::{NewRace, Race, RacialBonus};
use crate::domain::value_objects::{AbilityId, RaceId};

#[derive(FromRow)]
struct RaceRow {
    id: i64,
    name: String,
    description: Option<String>,
    speed: i64,
    created_on: DateTime<Utc>,
    updated_on: DateTime<Utc>,
}

#[derive(FromRow)]
struct BonusRow {
    ability_id: i64,
    bonus: i64,
}

const RACE_COLUMNS: &str = "id, name, description, speed, created_on, updated_on";

/// Repository for playable races
pub struct RaceRepository {
    pool: SqlitePool,
}

impl RaceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewRace) -> Result<Race> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO race (name, description, speed, created_on, updated_on)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.speed)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_insert_error(e, "race", &new.name))?;

        let id = RaceId::new(result.last_insert_rowid());
        write_bonuses(&mut tx, id, &new.ability_bonuses).await?;
        tx.commit().await?;

        tracing::debug!("Created race: {}", new.name);
        Ok(Race {
            id,
            name: new.name,
            description: new.description,
            speed: new.speed,
            ability_bonuses: new.ability_bonuses,
            created_on: now,
            updated_on: now,
        })
    }

    pub async fn get(&self, id: RaceId) -> Result<Option<Race>> {
        let row = sqlx::query_as::<_, RaceRow>(&format!(
            "SELECT {} FROM race WHERE id = ?",
            RACE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    pub async fn list(&self) -> Result<Vec<Race>> {
        let rows = sqlx::query_as::<_, RaceRow>(&format!(
            "SELECT {} FROM race ORDER BY name",
            RACE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        let mut races = Vec::with_capacity(rows.len());
        for row in rows {
            races.push(self.hydrate(row).await?);
        }
        Ok(races)
    }

    pub async fn update(&self, race: &Race) -> Result<()> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE race SET name = ?, description = ?, speed = ?, updated_on = ?
             WHERE id = ?",
        )
        .bind(&race.name)
        .bind(&race.description)
        .bind(race.speed)
        .bind(now)
        .bind(race.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_insert_error(e, "race", &race.name))?;

        if result.rows_affected() == 0 {
            anyhow::bail!("race not found: {}", race.id);
        }

        sqlx::query("DELETE FROM race_ability_bonus WHERE race_id = ?")
            .bind(race.id)
            .execute(&mut *tx)
            .await?;
        write_bonuses(&mut tx, race.id, &race.ability_bonuses).await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn delete(&self, id: RaceId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM race WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn hydrate(&self, row: RaceRow) -> Result<Race> {
        let bonuses = sqlx::query_as::<_, BonusRow>(
            "SELECT ability_id, bonus FROM race_ability_bonus WHERE race_id = ? ORDER BY ability_id",
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Race {
            id: RaceId::new(row.id),
            name: row.name,
            description: row.description,
            speed: row.speed,
            ability_bonuses: bonuses
                .into_iter()
                .map(|b| RacialBonus {
                    ability_id: AbilityId::new(b.ability_id),
                    bonus: b.bonus,
                })
                .collect(),
            created_on: row.created_on,
            updated_on: row.updated_on,
        })
    }
}

async fn write_bonuses(
    tx: &mut Transaction<'_, Sqlite>,
    race_id: RaceId,
    bonuses: &[RacialBonus],
) -> Result<()> {
    for bonus in bonuses {
        sqlx::query("INSERT INTO race_ability_bonus (race_id, ability_id, bonus) VALUES (?, ?, ?)")
            .bind(race_id)
            .bind(bonus.ability_id)
            .bind(bonus.bonus)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
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

    async fn ability(repository: &SqliteRepository, abbreviation: &str) -> AbilityId {
        repository
            .reference()
            .get_ability_by_abbreviation(abbreviation)
            .await
            .unwrap()
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_create_with_bonuses() {
        let repository = seeded().await;
        let races = repository.races();
        let con = ability(&repository, "CON").await;

        let created = races
            .create(NewRace {
                name: "Dwarf".to_string(),
                description: None,
                speed: 25,
                ability_bonuses: vec![RacialBonus {
                    ability_id: con,
                    bonus: 2,
                }],
            })
            .await
            .unwrap();

        let fetched = races.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.speed, 25);
        assert_eq!(fetched.bonus_for(con), 2);
    }

    #[tokio::test]
    async fn test_update_replaces_bonuses() {
        let repository = seeded().await;
        let races = repository.races();
        let str_id = ability(&repository, "STR").await;
        let cha = ability(&repository, "CHA").await;

        let mut race = races
            .create(NewRace {
                name: "Half-Orc".to_string(),
                description: None,
                speed: 30,
                ability_bonuses: vec![RacialBonus {
                    ability_id: str_id,
                    bonus: 2,
                }],
            })
            .await
            .unwrap();

        race.ability_bonuses = vec![RacialBonus {
            ability_id: cha,
            bonus: 1,
        }];
        races.update(&race).await.unwrap();

        let fetched = races.get(race.id).await.unwrap().unwrap();
        assert_eq!(fetched.bonus_for(str_id), 0);
        assert_eq!(fetched.bonus_for(cha), 1);
    }

    #[tokio::test]
    async fn test_delete_cascades_bonuses() {
        let repository = seeded().await;
        let races = repository.races();
        let dex = ability(&repository, "DEX").await;

        let race = races
            .create(NewRace {
                name: "Elf".to_string(),
                description: None,
                speed: 30,
                ability_bonuses: vec![RacialBonus {
                    ability_id: dex,
                    bonus: 2,
                }],
            })
            .await
            .unwrap();

        assert!(races.delete(race.id).await.unwrap());
        assert!(races.get(race.id).await.unwrap().is_none());

        let remaining: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM race_ability_bonus WHERE race_id = ?")
                .bind(race.id)
                .fetch_one(repository.pool())
                .await
                .unwrap();
        assert_eq!(remaining, 0);
    }
}
