//! Spell repository
//!
//! Spells span four tables: the spell row, its component rows, and the
//! class/damage-type association maps. Writes that touch the maps run in
//! a single transaction so a failed insert never leaves a spell with half
//! its associations.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, Sqlite, SqlitePool, Transaction};

use super::map_insert_error;
use crate::domain::entities::{NewSpell, Spell};
use crate::domain::value_objects::{ClassId, ComponentType, DamageTypeId, SchoolId, SpellId};

#[derive(FromRow)]
struct SpellRow {
    id: i64,
    name: String,
    ritual: bool,
    level: i64,
    school_id: i64,
    casting_time: i64,
    range: String,
    material_components: Option<String>,
    description: Option<String>,
    higher_levels: Option<String>,
    created_on: DateTime<Utc>,
    updated_on: DateTime<Utc>,
}

/// Repository for spell operations
pub struct SpellRepository {
    pool: SqlitePool,
}

impl SpellRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a spell with its components and associations
    pub async fn create(&self, new: NewSpell) -> Result<Spell> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"INSERT INTO spell
               (name, ritual, level, school_id, casting_time, "range",
                material_components, description, higher_levels, created_on, updated_on)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&new.name)
        .bind(new.ritual)
        .bind(new.level)
        .bind(new.school_id)
        .bind(new.casting_time)
        .bind(&new.range)
        .bind(&new.material_components)
        .bind(&new.description)
        .bind(&new.higher_levels)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_insert_error(e, "spell", &new.name))?;

        let id = SpellId::new(result.last_insert_rowid());
        write_relations(&mut tx, id, &new.components, &new.classes, &new.damage_types).await?;

        tx.commit().await?;
        tracing::debug!("Created spell: {}", new.name);

        Ok(Spell {
            id,
            name: new.name,
            ritual: new.ritual,
            level: new.level,
            school_id: new.school_id,
            casting_time: new.casting_time,
            range: new.range,
            components: new.components,
            material_components: new.material_components,
            description: new.description,
            higher_levels: new.higher_levels,
            classes: new.classes,
            damage_types: new.damage_types,
            created_on: now,
            updated_on: now,
        })
    }

    /// Get a spell by id, with components and associations loaded
    pub async fn get(&self, id: SpellId) -> Result<Option<Spell>> {
        let row = sqlx::query_as::<_, SpellRow>(
            r#"SELECT id, name, ritual, level, school_id, casting_time, "range",
                      material_components, description, higher_levels, created_on, updated_on
               FROM spell WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    /// List all spells, with components and associations loaded
    pub async fn list(&self) -> Result<Vec<Spell>> {
        let rows = sqlx::query_as::<_, SpellRow>(
            r#"SELECT id, name, ritual, level, school_id, casting_time, "range",
                      material_components, description, higher_levels, created_on, updated_on
               FROM spell ORDER BY level, name"#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut spells = Vec::with_capacity(rows.len());
        for row in rows {
            spells.push(self.hydrate(row).await?);
        }
        Ok(spells)
    }

    /// Replace a spell's stored fields and associations
    pub async fn update(&self, spell: &Spell) -> Result<()> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"UPDATE spell SET
                 name = ?, ritual = ?, level = ?, school_id = ?, casting_time = ?,
                 "range" = ?, material_components = ?, description = ?, higher_levels = ?,
                 updated_on = ?
               WHERE id = ?"#,
        )
        .bind(&spell.name)
        .bind(spell.ritual)
        .bind(spell.level)
        .bind(spell.school_id)
        .bind(spell.casting_time)
        .bind(&spell.range)
        .bind(&spell.material_components)
        .bind(&spell.description)
        .bind(&spell.higher_levels)
        .bind(now)
        .bind(spell.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_insert_error(e, "spell", &spell.name))?;

        if result.rows_affected() == 0 {
            anyhow::bail!("spell not found: {}", spell.id);
        }

        clear_relations(&mut tx, spell.id).await?;
        write_relations(
            &mut tx,
            spell.id,
            &spell.components,
            &spell.classes,
            &spell.damage_types,
        )
        .await?;

        tx.commit().await?;
        tracing::debug!("Updated spell: {}", spell.name);
        Ok(())
    }

    /// Delete a spell; component and map rows cascade
    pub async fn delete(&self, id: SpellId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM spell WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn hydrate(&self, row: SpellRow) -> Result<Spell> {
        let id = SpellId::new(row.id);

        let component_rows: Vec<(String,)> =
            sqlx::query_as("SELECT type FROM spell_component WHERE spell_id = ? ORDER BY type DESC")
                .bind(id)
                .fetch_all(&self.pool)
                .await?;
        let components = component_rows
            .iter()
            .filter_map(|(code,)| ComponentType::parse(code))
            .collect();

        let class_rows: Vec<(i64,)> =
            sqlx::query_as("SELECT class_id FROM class_spell_map WHERE spell_id = ? ORDER BY class_id")
                .bind(id)
                .fetch_all(&self.pool)
                .await?;

        let damage_rows: Vec<(i64,)> = sqlx::query_as(
            "SELECT damage_type_id FROM damage_type_spell_map WHERE spell_id = ? ORDER BY damage_type_id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Spell {
            id,
            name: row.name,
            ritual: row.ritual,
            level: row.level,
            school_id: SchoolId::new(row.school_id),
            casting_time: row.casting_time,
            range: row.range,
            components,
            material_components: row.material_components,
            description: row.description,
            higher_levels: row.higher_levels,
            classes: class_rows.into_iter().map(|(c,)| ClassId::new(c)).collect(),
            damage_types: damage_rows
                .into_iter()
                .map(|(d,)| DamageTypeId::new(d))
                .collect(),
            created_on: row.created_on,
            updated_on: row.updated_on,
        })
    }
}

async fn write_relations(
    tx: &mut Transaction<'_, Sqlite>,
    id: SpellId,
    components: &[ComponentType],
    classes: &[ClassId],
    damage_types: &[DamageTypeId],
) -> Result<()> {
    for component in components {
        sqlx::query("INSERT INTO spell_component (type, spell_id) VALUES (?, ?)")
            .bind(component.code())
            .bind(id)
            .execute(&mut **tx)
            .await
            .context("Failed to insert spell component")?;
    }
    for class_id in classes {
        sqlx::query("INSERT INTO class_spell_map (spell_id, class_id) VALUES (?, ?)")
            .bind(id)
            .bind(class_id)
            .execute(&mut **tx)
            .await
            .context("Failed to insert spell class association")?;
    }
    for damage_type_id in damage_types {
        sqlx::query("INSERT INTO damage_type_spell_map (damage_type_id, spell_id) VALUES (?, ?)")
            .bind(damage_type_id)
            .bind(id)
            .execute(&mut **tx)
            .await
            .context("Failed to insert spell damage type association")?;
    }
    Ok(())
}

async fn clear_relations(tx: &mut Transaction<'_, Sqlite>, id: SpellId) -> Result<()> {
    sqlx::query("DELETE FROM spell_component WHERE spell_id = ?")
        .bind(id)
        .execute(&mut **tx)
        .await?;
    sqlx::query("DELETE FROM class_spell_map WHERE spell_id = ?")
        .bind(id)
        .execute(&mut **tx)
        .await?;
    sqlx::query("DELETE FROM damage_type_spell_map WHERE spell_id = ?")
        .bind(id)
        .execute(&mut **tx)
        .await?;
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

    fn fireball(school_id: SchoolId, classes: Vec<ClassId>, damage_types: Vec<DamageTypeId>) -> NewSpell {
        NewSpell {
            name: "Fireball".to_string(),
            ritual: false,
            level: 3,
            school_id,
            casting_time: 1,
            range: "150 feet".to_string(),
            components: vec![
                ComponentType::Verbal,
                ComponentType::Somatic,
                ComponentType::Material,
            ],
            material_components: Some("a tiny ball of bat guano and sulfur".to_string()),
            description: Some("A bright streak flashes...".to_string()),
            higher_levels: Some("+1d6 per slot level above 3rd".to_string()),
            classes,
            damage_types,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_roundtrip() {
        let repository = seeded().await;
        let reference = repository.reference();
        let schools = reference.list_schools().await.unwrap();
        let evocation = schools.iter().find(|s| s.name == "Evocation").unwrap();
        let wizard = reference.create_class("Wizard").await.unwrap();
        let damage_types = reference.list_damage_types().await.unwrap();
        let fire = damage_types.iter().find(|d| d.name == "Fire").unwrap();

        let spells = repository.spells();
        let created = spells
            .create(fireball(evocation.id, vec![wizard.id], vec![fire.id]))
            .await
            .unwrap();

        let fetched = spells.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Fireball");
        assert_eq!(fetched.level, 3);
        assert_eq!(fetched.components.len(), 3);
        assert_eq!(fetched.classes, vec![wizard.id]);
        assert_eq!(fetched.damage_types, vec![fire.id]);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_conflict() {
        let repository = seeded().await;
        let reference = repository.reference();
        let schools = reference.list_schools().await.unwrap();
        let school = &schools[0];

        let spells = repository.spells();
        spells
            .create(fireball(school.id, vec![], vec![]))
            .await
            .unwrap();
        let err = spells
            .create(fireball(school.id, vec![], vec![]))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_update_replaces_associations() {
        let repository = seeded().await;
        let reference = repository.reference();
        let schools = reference.list_schools().await.unwrap();
        let school = &schools[0];
        let wizard = reference.create_class("Wizard").await.unwrap();
        let sorcerer = reference.create_class("Sorcerer").await.unwrap();

        let spells = repository.spells();
        let mut spell = spells
            .create(fireball(school.id, vec![wizard.id], vec![]))
            .await
            .unwrap();

        spell.classes = vec![sorcerer.id];
        spell.components = vec![ComponentType::Verbal];
        spell.material_components = None;
        spells.update(&spell).await.unwrap();

        let fetched = spells.get(spell.id).await.unwrap().unwrap();
        assert_eq!(fetched.classes, vec![sorcerer.id]);
        assert_eq!(fetched.components, vec![ComponentType::Verbal]);
        assert!(fetched.material_components.is_none());
        assert!(fetched.updated_on >= fetched.created_on);
    }

    #[tokio::test]
    async fn test_delete_cascades_relations() {
        let repository = seeded().await;
        let reference = repository.reference();
        let schools = reference.list_schools().await.unwrap();
        let school = &schools[0];

        let spells = repository.spells();
        let spell = spells
            .create(fireball(school.id, vec![], vec![]))
            .await
            .unwrap();

        assert!(spells.delete(spell.id).await.unwrap());
        assert!(spells.get(spell.id).await.unwrap().is_none());

        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM spell_component WHERE spell_id = ?")
                .bind(spell.id)
                .fetch_one(repository.pool())
                .await
                .unwrap();
        assert_eq!(count, 0);
    }
}
