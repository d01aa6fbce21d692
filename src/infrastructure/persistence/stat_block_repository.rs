//! Stat block repository
//!
//! A stat block spans the stat_block row plus child rows for ability
//! scores, class levels, skill proficiencies, and saving-throw
//! proficiencies. Per-ability bonus lists are stored as JSON text, the
//! same treatment the rest of the codebase gives nested value objects.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, Sqlite, SqlitePool, Transaction};

use crate::domain::entities::{
    AbilityScore, ClassLevel, NewStatBlock, SkillProficiency, StatBlock,
};
use crate::domain::value_objects::{
    AbilityId, Bonus, ClassId, Proficiency, RaceId, SkillId, StatBlockId,
};

#[derive(FromRow)]
struct StatBlockRow {
    id: i64,
    name: String,
    race_id: Option<i64>,
    armor_bonuses: String,
    created_on: DateTime<Utc>,
    updated_on: DateTime<Utc>,
}

#[derive(FromRow)]
struct AbilityScoreRow {
    ability_id: i64,
    base_score: i64,
    other_bonuses: String,
}

#[derive(FromRow)]
struct ClassLevelRow {
    class_id: i64,
    level: i64,
}

#[derive(FromRow)]
struct SkillRow {
    skill_id: i64,
    proficiency: String,
}

/// Repository for stat block operations
pub struct StatBlockRepository {
    pool: SqlitePool,
}

impl StatBlockRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewStatBlock) -> Result<StatBlock> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let armor_json = serde_json::to_string(&new.armor_bonuses)?;
        let result = sqlx::query(
            "INSERT INTO stat_block (name, race_id, armor_bonuses, created_on, updated_on)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&new.name)
        .bind(new.race_id)
        .bind(&armor_json)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let id = StatBlockId::new(result.last_insert_rowid());
        write_children(&mut tx, id, &new, now).await?;

        tx.commit().await?;
        tracing::debug!("Created stat block: {}", new.name);

        Ok(StatBlock {
            id,
            name: new.name,
            race_id: new.race_id,
            abilities: new.abilities,
            classes: new.classes,
            skills: new.skills,
            saving_throws: new.saving_throws,
            armor_bonuses: new.armor_bonuses,
            created_on: now,
            updated_on: now,
        })
    }

    pub async fn get(&self, id: StatBlockId) -> Result<Option<StatBlock>> {
        let row = sqlx::query_as::<_, StatBlockRow>(
            "SELECT id, name, race_id, armor_bonuses, created_on, updated_on
             FROM stat_block WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    pub async fn list(&self) -> Result<Vec<StatBlock>> {
        let rows = sqlx::query_as::<_, StatBlockRow>(
            "SELECT id, name, race_id, armor_bonuses, created_on, updated_on
             FROM stat_block ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut blocks = Vec::with_capacity(rows.len());
        for row in rows {
            blocks.push(self.hydrate(row).await?);
        }
        Ok(blocks)
    }

    /// Replace a stat block's stored fields and child rows
    pub async fn update(&self, block: &StatBlock) -> Result<()> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let armor_json = serde_json::to_string(&block.armor_bonuses)?;
        let result = sqlx::query(
            "UPDATE stat_block SET name = ?, race_id = ?, armor_bonuses = ?, updated_on = ?
             WHERE id = ?",
        )
        .bind(&block.name)
        .bind(block.race_id)
        .bind(&armor_json)
        .bind(now)
        .bind(block.id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            anyhow::bail!("stat block not found: {}", block.id);
        }

        clear_children(&mut tx, block.id).await?;
        let as_new = NewStatBlock {
            name: block.name.clone(),
            race_id: block.race_id,
            abilities: block.abilities.clone(),
            classes: block.classes.clone(),
            skills: block.skills.clone(),
            saving_throws: block.saving_throws.clone(),
            armor_bonuses: block.armor_bonuses.clone(),
        };
        write_children(&mut tx, block.id, &as_new, now).await?;

        tx.commit().await?;
        tracing::debug!("Updated stat block: {}", block.name);
        Ok(())
    }

    /// Replace just the class levels of a stat block
    pub async fn set_class_levels(&self, id: StatBlockId, classes: &[ClassLevel]) -> Result<()> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("UPDATE stat_block SET updated_on = ? WHERE id = ?")
            .bind(now)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            anyhow::bail!("stat block not found: {}", id);
        }

        sqlx::query("DELETE FROM stat_block_class WHERE stat_block_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        for class_level in classes {
            sqlx::query(
                "INSERT INTO stat_block_class (stat_block_id, class_id, level, created_on, updated_on)
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(id)
            .bind(class_level.class_id)
            .bind(class_level.level)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await
            .context("Failed to insert stat block class level")?;
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn delete(&self, id: StatBlockId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM stat_block WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn hydrate(&self, row: StatBlockRow) -> Result<StatBlock> {
        let id = StatBlockId::new(row.id);

        let ability_rows = sqlx::query_as::<_, AbilityScoreRow>(
            "SELECT ability_id, base_score, other_bonuses
             FROM stat_block_ability WHERE stat_block_id = ? ORDER BY ability_id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        let mut abilities = Vec::with_capacity(ability_rows.len());
        for r in ability_rows {
            let other_bonuses: Vec<Bonus> = serde_json::from_str(&r.other_bonuses)
                .context("Corrupt ability bonus list")?;
            abilities.push(AbilityScore {
                ability_id: AbilityId::new(r.ability_id),
                base_score: r.base_score,
                other_bonuses,
            });
        }

        let class_rows = sqlx::query_as::<_, ClassLevelRow>(
            "SELECT class_id, level FROM stat_block_class
             WHERE stat_block_id = ? ORDER BY class_id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let skill_rows = sqlx::query_as::<_, SkillRow>(
            "SELECT skill_id, proficiency FROM stat_block_skill
             WHERE stat_block_id = ? ORDER BY skill_id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let save_rows: Vec<(i64,)> = sqlx::query_as(
            "SELECT ability_id FROM stat_block_save
             WHERE stat_block_id = ? ORDER BY ability_id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let armor_bonuses: Vec<Bonus> =
            serde_json::from_str(&row.armor_bonuses).context("Corrupt armor bonus list")?;

        Ok(StatBlock {
            id,
            name: row.name,
            race_id: row.race_id.map(RaceId::new),
            abilities,
            classes: class_rows
                .into_iter()
                .map(|r| ClassLevel {
                    class_id: ClassId::new(r.class_id),
                    level: r.level,
                })
                .collect(),
            skills: skill_rows
                .into_iter()
                .map(|r| SkillProficiency {
                    skill_id: SkillId::new(r.skill_id),
                    proficiency: Proficiency::parse(&r.proficiency).unwrap_or_default(),
                })
                .collect(),
            saving_throws: save_rows.into_iter().map(|(a,)| AbilityId::new(a)).collect(),
            armor_bonuses,
            created_on: row.created_on,
            updated_on: row.updated_on,
        })
    }
}

async fn write_children(
    tx: &mut Transaction<'_, Sqlite>,
    id: StatBlockId,
    block: &NewStatBlock,
    now: DateTime<Utc>,
) -> Result<()> {
    for ability in &block.abilities {
        let bonuses_json = serde_json::to_string(&ability.other_bonuses)?;
        sqlx::query(
            "INSERT INTO stat_block_ability (stat_block_id, ability_id, base_score, other_bonuses)
             VALUES (?, ?, ?, ?)",
        )
        .bind(id)
        .bind(ability.ability_id)
        .bind(ability.base_score)
        .bind(&bonuses_json)
        .execute(&mut **tx)
        .await
        .context("Failed to insert stat block ability score")?;
    }

    for class_level in &block.classes {
        sqlx::query(
            "INSERT INTO stat_block_class (stat_block_id, class_id, level, created_on, updated_on)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(class_level.class_id)
        .bind(class_level.level)
        .bind(now)
        .bind(now)
        .execute(&mut **tx)
        .await
        .context("Failed to insert stat block class level")?;
    }

    for skill in &block.skills {
        sqlx::query(
            "INSERT INTO stat_block_skill (stat_block_id, skill_id, proficiency)
             VALUES (?, ?, ?)",
        )
        .bind(id)
        .bind(skill.skill_id)
        .bind(skill.proficiency.as_str())
        .execute(&mut **tx)
        .await
        .context("Failed to insert stat block skill proficiency")?;
    }

    for ability_id in &block.saving_throws {
        sqlx::query(
            "INSERT INTO stat_block_save (stat_block_id, ability_id) VALUES (?, ?)",
        )
        .bind(id)
        .bind(ability_id)
        .execute(&mut **tx)
        .await
        .context("Failed to insert stat block saving throw")?;
    }

    Ok(())
}

async fn clear_children(tx: &mut Transaction<'_, Sqlite>, id: StatBlockId) -> Result<()> {
    for table in [
        "stat_block_ability",
        "stat_block_class",
        "stat_block_skill",
        "stat_block_save",
    ] {
        sqlx::query(&format!("DELETE FROM {} WHERE stat_block_id = ?", table))
            .bind(id)
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

    #[tokio::test]
    async fn test_create_and_get_roundtrip() {
        let repository = seeded().await;
        let reference = repository.reference();
        let strength = reference
            .get_ability_by_abbreviation("STR")
            .await
            .unwrap()
            .unwrap();
        let fighter = reference.create_class("Fighter").await.unwrap();
        let skills = reference.list_skills().await.unwrap();
        let athletics = skills.iter().find(|s| s.name == "Athletics").unwrap();

        let blocks = repository.stat_blocks();
        let created = blocks
            .create(NewStatBlock {
                name: "Flinty".to_string(),
                race_id: None,
                abilities: vec![AbilityScore {
                    ability_id: strength.id,
                    base_score: 16,
                    other_bonuses: vec![Bonus::new("Gauntlets", 1)],
                }],
                classes: vec![ClassLevel {
                    class_id: fighter.id,
                    level: 5,
                }],
                skills: vec![SkillProficiency {
                    skill_id: athletics.id,
                    proficiency: Proficiency::Proficient,
                }],
                saving_throws: vec![strength.id],
                armor_bonuses: vec![Bonus::new("Chain Mail", 6)],
            })
            .await
            .unwrap();

        let fetched = blocks.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Flinty");
        assert_eq!(fetched.total_level(), 5);
        assert_eq!(fetched.abilities.len(), 1);
        assert_eq!(fetched.abilities[0].other_bonuses[0].value, 1);
        assert_eq!(
            fetched.skill_proficiency(athletics.id),
            Proficiency::Proficient
        );
        assert!(fetched.has_save_proficiency(strength.id));
        assert_eq!(fetched.armor_bonuses[0].source, "Chain Mail");
    }

    #[tokio::test]
    async fn test_set_class_levels_replaces() {
        let repository = seeded().await;
        let reference = repository.reference();
        let fighter = reference.create_class("Fighter").await.unwrap();
        let rogue = reference.create_class("Rogue").await.unwrap();

        let blocks = repository.stat_blocks();
        let block = blocks
            .create(NewStatBlock {
                name: "Flinty".to_string(),
                race_id: None,
                abilities: vec![],
                classes: vec![ClassLevel {
                    class_id: fighter.id,
                    level: 1,
                }],
                skills: vec![],
                saving_throws: vec![],
                armor_bonuses: vec![],
            })
            .await
            .unwrap();

        blocks
            .set_class_levels(
                block.id,
                &[
                    ClassLevel {
                        class_id: fighter.id,
                        level: 3,
                    },
                    ClassLevel {
                        class_id: rogue.id,
                        level: 2,
                    },
                ],
            )
            .await
            .unwrap();

        let fetched = blocks.get(block.id).await.unwrap().unwrap();
        assert_eq!(fetched.total_level(), 5);
        assert_eq!(fetched.classes.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_cascades_children() {
        let repository = seeded().await;
        let blocks = repository.stat_blocks();
        let reference = repository.reference();
        let strength = reference
            .get_ability_by_abbreviation("STR")
            .await
            .unwrap()
            .unwrap();

        let block = blocks
            .create(NewStatBlock {
                name: "Goblin".to_string(),
                race_id: None,
                abilities: vec![AbilityScore {
                    ability_id: strength.id,
                    base_score: 8,
                    other_bonuses: vec![],
                }],
                classes: vec![],
                skills: vec![],
                saving_throws: vec![],
                armor_bonuses: vec![],
            })
            .await
            .unwrap();

        assert!(blocks.delete(block.id).await.unwrap());
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM stat_block_ability WHERE stat_block_id = ?")
                .bind(block.id)
                .fetch_one(repository.pool())
                .await
                .unwrap();
        assert_eq!(count, 0);
    }
}
