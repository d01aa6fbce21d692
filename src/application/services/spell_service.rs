//! Spell service - application use cases for the spell compendium

use anyhow::Result;
use async_trait::async_trait;
use tracing::instrument;

use crate::domain::entities::{NewSpell, Spell};
use crate::domain::value_objects::{ClassId, ComponentType, DamageTypeId, SchoolId, SpellId};
use crate::infrastructure::persistence::SqliteRepository;

/// Request to update an existing spell. `None` leaves a field untouched;
/// the nested options clear nullable fields when `Some(None)`.
#[derive(Debug, Clone, Default)]
pub struct UpdateSpellRequest {
    pub name: Option<String>,
    pub ritual: Option<bool>,
    pub level: Option<i64>,
    pub school_id: Option<SchoolId>,
    pub casting_time: Option<i64>,
    pub range: Option<String>,
    pub components: Option<Vec<ComponentType>>,
    pub material_components: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub higher_levels: Option<Option<String>>,
    pub classes: Option<Vec<ClassId>>,
    pub damage_types: Option<Vec<DamageTypeId>>,
}

/// Filters applied when listing spells
#[derive(Debug, Clone, Default)]
pub struct SpellFilter {
    pub level: Option<i64>,
    pub school_id: Option<SchoolId>,
    pub class_id: Option<ClassId>,
    pub ritual: Option<bool>,
    pub name: Option<String>,
}

impl SpellFilter {
    fn matches(&self, spell: &Spell) -> bool {
        if let Some(level) = self.level {
            if spell.level != level {
                return false;
            }
        }
        if let Some(school_id) = self.school_id {
            if spell.school_id != school_id {
                return false;
            }
        }
        if let Some(class_id) = self.class_id {
            if !spell.classes.contains(&class_id) {
                return false;
            }
        }
        if let Some(ritual) = self.ritual {
            if spell.ritual != ritual {
                return false;
            }
        }
        if let Some(ref name) = self.name {
            if !spell.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

/// Spell service trait defining the application use cases
#[async_trait]
pub trait SpellService: Send + Sync {
    /// Create a new spell
    async fn create_spell(&self, new: NewSpell) -> Result<Spell>;

    /// Get a spell by ID
    async fn get_spell(&self, id: SpellId) -> Result<Option<Spell>>;

    /// List spells matching the filter
    async fn list_spells(&self, filter: SpellFilter) -> Result<Vec<Spell>>;

    /// Update a spell
    async fn update_spell(&self, id: SpellId, request: UpdateSpellRequest) -> Result<Spell>;

    /// Delete a spell
    async fn delete_spell(&self, id: SpellId) -> Result<()>;
}

/// Default implementation of SpellService using the SQLite repository
pub struct SpellServiceImpl {
    repository: SqliteRepository,
}

impl SpellServiceImpl {
    pub fn new(repository: SqliteRepository) -> Self {
        Self { repository }
    }

    /// Validate the invariant fields shared by create and update
    fn validate_spell(
        name: &str,
        level: i64,
        range: &str,
        components: &[ComponentType],
        material_components: Option<&str>,
    ) -> Result<()> {
        if name.trim().is_empty() {
            anyhow::bail!("Spell name cannot be empty");
        }
        if name.len() > 256 {
            anyhow::bail!("Spell name cannot exceed 256 characters");
        }
        if !(0..=9).contains(&level) {
            anyhow::bail!("Spell level must be between 0 and 9");
        }
        if range.len() > 64 {
            anyhow::bail!("Spell range cannot exceed 64 characters");
        }

        let mut seen = Vec::with_capacity(components.len());
        for component in components {
            if seen.contains(component) {
                anyhow::bail!("Duplicate spell component: {}", component.code());
            }
            seen.push(*component);
        }

        if let Some(material) = material_components {
            if material.len() > 1024 {
                anyhow::bail!("Material components cannot exceed 1024 characters");
            }
            if !components.contains(&ComponentType::Material) {
                anyhow::bail!("Material components require the M component");
            }
        }
        Ok(())
    }

    async fn ensure_school_exists(&self, school_id: SchoolId) -> Result<()> {
        self.repository
            .reference()
            .get_school(school_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("School of magic not found: {}", school_id))?;
        Ok(())
    }
}

#[async_trait]
impl SpellService for SpellServiceImpl {
    #[instrument(skip(self, new), fields(name = %new.name, level = new.level))]
    async fn create_spell(&self, new: NewSpell) -> Result<Spell> {
        Self::validate_spell(
            &new.name,
            new.level,
            &new.range,
            &new.components,
            new.material_components.as_deref(),
        )?;
        self.ensure_school_exists(new.school_id).await?;

        self.repository.spells().create(new).await
    }

    #[instrument(skip(self))]
    async fn get_spell(&self, id: SpellId) -> Result<Option<Spell>> {
        self.repository.spells().get(id).await
    }

    #[instrument(skip(self, filter))]
    async fn list_spells(&self, filter: SpellFilter) -> Result<Vec<Spell>> {
        let spells = self.repository.spells().list().await?;
        Ok(spells.into_iter().filter(|s| filter.matches(s)).collect())
    }

    #[instrument(skip(self, request))]
    async fn update_spell(&self, id: SpellId, request: UpdateSpellRequest) -> Result<Spell> {
        let mut spell = self
            .repository
            .spells()
            .get(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Spell not found: {}", id))?;

        if let Some(name) = request.name {
            spell.name = name;
        }
        if let Some(ritual) = request.ritual {
            spell.ritual = ritual;
        }
        if let Some(level) = request.level {
            spell.level = level;
        }
        if let Some(school_id) = request.school_id {
            self.ensure_school_exists(school_id).await?;
            spell.school_id = school_id;
        }
        if let Some(casting_time) = request.casting_time {
            spell.casting_time = casting_time;
        }
        if let Some(range) = request.range {
            spell.range = range;
        }
        if let Some(components) = request.components {
            spell.components = components;
        }
        if let Some(material_components) = request.material_components {
            spell.material_components = material_components;
        }
        if let Some(description) = request.description {
            spell.description = description;
        }
        if let Some(higher_levels) = request.higher_levels {
            spell.higher_levels = higher_levels;
        }
        if let Some(classes) = request.classes {
            spell.classes = classes;
        }
        if let Some(damage_types) = request.damage_types {
            spell.damage_types = damage_types;
        }

        Self::validate_spell(
            &spell.name,
            spell.level,
            &spell.range,
            &spell.components,
            spell.material_components.as_deref(),
        )?;

        self.repository.spells().update(&spell).await?;
        Ok(spell)
    }

    #[instrument(skip(self))]
    async fn delete_spell(&self, id: SpellId) -> Result<()> {
        if !self.repository.spells().delete(id).await? {
            anyhow::bail!("Spell not found: {}", id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_components() -> Vec<ComponentType> {
        vec![ComponentType::Verbal, ComponentType::Somatic]
    }

    #[test]
    fn test_validate_accepts_plain_spell() {
        assert!(
            SpellServiceImpl::validate_spell("Mage Hand", 0, "30 feet", &base_components(), None)
                .is_ok()
        );
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let err =
            SpellServiceImpl::validate_spell("  ", 1, "Touch", &base_components(), None).unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_level() {
        assert!(SpellServiceImpl::validate_spell("X", 10, "Self", &[], None).is_err());
        assert!(SpellServiceImpl::validate_spell("X", -1, "Self", &[], None).is_err());
    }

    #[test]
    fn test_validate_rejects_material_without_component() {
        let err = SpellServiceImpl::validate_spell(
            "Fireball",
            3,
            "150 feet",
            &base_components(),
            Some("bat guano"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("M component"));
    }

    #[test]
    fn test_validate_rejects_duplicate_components() {
        let err = SpellServiceImpl::validate_spell(
            "Shield",
            1,
            "Self",
            &[ComponentType::Verbal, ComponentType::Verbal],
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Duplicate"));
    }

    #[test]
    fn test_filter_matches_on_all_fields() {
        let filter = SpellFilter {
            level: Some(3),
            ritual: Some(false),
            name: Some("fire".to_string()),
            ..Default::default()
        };
        let spell = Spell {
            id: SpellId::new(1),
            name: "Fireball".to_string(),
            ritual: false,
            level: 3,
            school_id: SchoolId::new(1),
            casting_time: 1,
            range: "150 feet".to_string(),
            components: vec![],
            material_components: None,
            description: None,
            higher_levels: None,
            classes: vec![],
            damage_types: vec![],
            created_on: chrono::Utc::now(),
            updated_on: chrono::Utc::now(),
        };
        assert!(filter.matches(&spell));

        let mut ritual_filter = filter.clone();
        ritual_filter.ritual = Some(true);
        assert!(!ritual_filter.matches(&spell));
    }
}
