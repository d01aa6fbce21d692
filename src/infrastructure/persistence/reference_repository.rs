//! Reference data repository (schools, damage types, coin types,
//! abilities, skills, classes)

use anyhow::Result;
use chrono::Utc;
use sqlx::{FromRow, SqlitePool};

use super::map_insert_error;
use crate::domain::entities::{Ability, Class, CoinType, DamageType, SchoolOfMagic, Skill};
use crate::domain::value_objects::{
    AbilityId, ClassId, CoinTypeId, DamageTypeId, SchoolId, SkillId,
};

#[derive(FromRow)]
struct NamedRow {
    id: i64,
    name: String,
    created_on: chrono::DateTime<Utc>,
    updated_on: chrono::DateTime<Utc>,
}

#[derive(FromRow)]
struct ClassRow {
    id: i64,
    name: String,
}

#[derive(FromRow)]
struct CoinTypeRow {
    id: i64,
    name: String,
    abbreviation: String,
    value: i64,
    created_on: chrono::DateTime<Utc>,
    updated_on: chrono::DateTime<Utc>,
}

#[derive(FromRow)]
struct AbilityRow {
    id: i64,
    name: String,
    abbreviation: String,
    created_on: chrono::DateTime<Utc>,
    updated_on: chrono::DateTime<Utc>,
}

#[derive(FromRow)]
struct SkillRow {
    id: i64,
    name: String,
    default_ability_id: i64,
    created_on: chrono::DateTime<Utc>,
    updated_on: chrono::DateTime<Utc>,
}

/// Repository for the lookup tables
pub struct ReferenceRepository {
    pool: SqlitePool,
}

impl ReferenceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // Schools of magic

    pub async fn list_schools(&self) -> Result<Vec<SchoolOfMagic>> {
        let rows = sqlx::query_as::<_, NamedRow>(
            "SELECT id, name, created_on, updated_on FROM school_of_magic ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| SchoolOfMagic {
                id: SchoolId::new(r.id),
                name: r.name,
                created_on: r.created_on,
                updated_on: r.updated_on,
            })
            .collect())
    }

    pub async fn get_school(&self, id: SchoolId) -> Result<Option<SchoolOfMagic>> {
        let row = sqlx::query_as::<_, NamedRow>(
            "SELECT id, name, created_on, updated_on FROM school_of_magic WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| SchoolOfMagic {
            id: SchoolId::new(r.id),
            name: r.name,
            created_on: r.created_on,
            updated_on: r.updated_on,
        }))
    }

    pub async fn create_school(&self, name: &str) -> Result<SchoolOfMagic> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO school_of_magic (name, created_on, updated_on) VALUES (?, ?, ?)",
        )
        .bind(name)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "school of magic", name))?;

        tracing::debug!("Created school of magic: {}", name);
        Ok(SchoolOfMagic {
            id: SchoolId::new(result.last_insert_rowid()),
            name: name.to_string(),
            created_on: now,
            updated_on: now,
        })
    }

    pub async fn delete_school(&self, id: SchoolId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM school_of_magic WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // Damage types

    pub async fn list_damage_types(&self) -> Result<Vec<DamageType>> {
        let rows = sqlx::query_as::<_, NamedRow>(
            "SELECT id, name, created_on, updated_on FROM damage_type ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| DamageType {
                id: DamageTypeId::new(r.id),
                name: r.name,
                created_on: r.created_on,
                updated_on: r.updated_on,
            })
            .collect())
    }

    pub async fn create_damage_type(&self, name: &str) -> Result<DamageType> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO damage_type (name, created_on, updated_on) VALUES (?, ?, ?)",
        )
        .bind(name)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "damage type", name))?;

        Ok(DamageType {
            id: DamageTypeId::new(result.last_insert_rowid()),
            name: name.to_string(),
            created_on: now,
            updated_on: now,
        })
    }

    pub async fn delete_damage_type(&self, id: DamageTypeId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM damage_type WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // Classes

    pub async fn list_classes(&self) -> Result<Vec<Class>> {
        let rows = sqlx::query_as::<_, ClassRow>("SELECT id, name FROM class ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| Class {
                id: ClassId::new(r.id),
                name: r.name,
            })
            .collect())
    }

    pub async fn create_class(&self, name: &str) -> Result<Class> {
        let result = sqlx::query("INSERT INTO class (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| map_insert_error(e, "class", name))?;

        Ok(Class {
            id: ClassId::new(result.last_insert_rowid()),
            name: name.to_string(),
        })
    }

    pub async fn delete_class(&self, id: ClassId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM class WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // Coin types

    pub async fn list_coin_types(&self) -> Result<Vec<CoinType>> {
        let rows = sqlx::query_as::<_, CoinTypeRow>(
            "SELECT id, name, abbreviation, value, created_on, updated_on
             FROM coin_type ORDER BY value",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(coin_from_row).collect())
    }

    pub async fn get_coin_type(&self, id: CoinTypeId) -> Result<Option<CoinType>> {
        let row = sqlx::query_as::<_, CoinTypeRow>(
            "SELECT id, name, abbreviation, value, created_on, updated_on
             FROM coin_type WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(coin_from_row))
    }

    pub async fn create_coin_type(
        &self,
        name: &str,
        abbreviation: &str,
        value: i64,
    ) -> Result<CoinType> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO coin_type (name, abbreviation, value, created_on, updated_on)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(name)
        .bind(abbreviation)
        .bind(value)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "coin type", name))?;

        Ok(CoinType {
            id: CoinTypeId::new(result.last_insert_rowid()),
            name: name.to_string(),
            abbreviation: abbreviation.to_string(),
            value,
            created_on: now,
            updated_on: now,
        })
    }

    // Abilities

    pub async fn list_abilities(&self) -> Result<Vec<Ability>> {
        let rows = sqlx::query_as::<_, AbilityRow>(
            "SELECT id, name, abbreviation, created_on, updated_on FROM ability ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ability_from_row).collect())
    }

    pub async fn get_ability_by_abbreviation(&self, abbreviation: &str) -> Result<Option<Ability>> {
        let row = sqlx::query_as::<_, AbilityRow>(
            "SELECT id, name, abbreviation, created_on, updated_on
             FROM ability WHERE abbreviation = ?",
        )
        .bind(abbreviation)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ability_from_row))
    }

    pub async fn create_ability(&self, name: &str, abbreviation: &str) -> Result<Ability> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO ability (name, abbreviation, created_on, updated_on)
             VALUES (?, ?, ?, ?)",
        )
        .bind(name)
        .bind(abbreviation)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "ability", name))?;

        Ok(Ability {
            id: AbilityId::new(result.last_insert_rowid()),
            name: name.to_string(),
            abbreviation: abbreviation.to_string(),
            created_on: now,
            updated_on: now,
        })
    }

    pub async fn count_abilities(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM ability")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    // Skills

    pub async fn list_skills(&self) -> Result<Vec<Skill>> {
        let rows = sqlx::query_as::<_, SkillRow>(
            "SELECT id, name, default_ability_id, created_on, updated_on
             FROM skill ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Skill {
                id: SkillId::new(r.id),
                name: r.name,
                default_ability_id: AbilityId::new(r.default_ability_id),
                created_on: r.created_on,
                updated_on: r.updated_on,
            })
            .collect())
    }

    pub async fn create_skill(&self, name: &str, default_ability_id: AbilityId) -> Result<Skill> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO skill (name, default_ability_id, created_on, updated_on)
             VALUES (?, ?, ?, ?)",
        )
        .bind(name)
        .bind(default_ability_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "skill", name))?;

        Ok(Skill {
            id: SkillId::new(result.last_insert_rowid()),
            name: name.to_string(),
            default_ability_id,
            created_on: now,
            updated_on: now,
        })
    }
}

fn coin_from_row(r: CoinTypeRow) -> CoinType {
    CoinType {
        id: CoinTypeId::new(r.id),
        name: r.name,
        abbreviation: r.abbreviation,
        value: r.value,
        created_on: r.created_on,
        updated_on: r.updated_on,
    }
}

fn ability_from_row(r: AbilityRow) -> Ability {
    Ability {
        id: AbilityId::new(r.id),
        name: r.name,
        abbreviation: r.abbreviation,
        created_on: r.created_on,
        updated_on: r.updated_on,
    }
}

#[cfg(test)]
mod tests {
    use crate::infrastructure::persistence::SqliteRepository;

    #[tokio::test]
    async fn test_school_create_list_delete() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        let reference = repository.reference();

        let school = reference.create_school("Evocation").await.unwrap();
        let listed = reference.list_schools().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Evocation");

        assert!(reference.delete_school(school.id).await.unwrap());
        assert!(reference.list_schools().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_school_is_conflict() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        let reference = repository.reference();

        reference.create_school("Illusion").await.unwrap();
        let err = reference.create_school("Illusion").await.unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_ability_lookup_by_abbreviation() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        let reference = repository.reference();

        reference.create_ability("Dexterity", "DEX").await.unwrap();
        let found = reference
            .get_ability_by_abbreviation("DEX")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.name, "Dexterity");
        assert!(reference
            .get_ability_by_abbreviation("STR")
            .await
            .unwrap()
            .is_none());
    }
}
