//! Stat block service - application use cases for stat blocks and the
//! derived character sheet

use anyhow::Result;
use async_trait::async_trait;
use tracing::instrument;

use crate::domain::entities::{AbilityScore, ClassLevel, NewStatBlock, StatBlock};
use crate::domain::sheet::CharacterSheet;
use crate::domain::value_objects::{Bonus, RaceId, StatBlockId};
use crate::infrastructure::persistence::SqliteRepository;

/// Request to update an existing stat block. `None` leaves a field
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateStatBlockRequest {
    pub name: Option<String>,
    pub race_id: Option<Option<RaceId>>,
    pub abilities: Option<Vec<AbilityScore>>,
    pub skills: Option<Vec<crate::domain::entities::SkillProficiency>>,
    pub saving_throws: Option<Vec<crate::domain::value_objects::AbilityId>>,
    pub armor_bonuses: Option<Vec<Bonus>>,
}

/// Stat block service trait defining the application use cases
#[async_trait]
pub trait StatBlockService: Send + Sync {
    /// Create a new stat block
    async fn create_stat_block(&self, new: NewStatBlock) -> Result<StatBlock>;

    /// Get a stat block by ID
    async fn get_stat_block(&self, id: StatBlockId) -> Result<Option<StatBlock>>;

    /// List all stat blocks
    async fn list_stat_blocks(&self) -> Result<Vec<StatBlock>>;

    /// Update a stat block
    async fn update_stat_block(
        &self,
        id: StatBlockId,
        request: UpdateStatBlockRequest,
    ) -> Result<StatBlock>;

    /// Replace a stat block's class levels
    async fn set_class_levels(&self, id: StatBlockId, classes: Vec<ClassLevel>)
        -> Result<StatBlock>;

    /// Delete a stat block
    async fn delete_stat_block(&self, id: StatBlockId) -> Result<()>;

    /// Derive the full character sheet for a stat block
    async fn character_sheet(&self, id: StatBlockId) -> Result<CharacterSheet>;
}

/// Default implementation of StatBlockService using the SQLite repository
pub struct StatBlockServiceImpl {
    repository: SqliteRepository,
}

impl StatBlockServiceImpl {
    pub fn new(repository: SqliteRepository) -> Self {
        Self { repository }
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            anyhow::bail!("Stat block name cannot be empty");
        }
        if name.len() > 256 {
            anyhow::bail!("Stat block name cannot exceed 256 characters");
        }
        Ok(())
    }

    fn validate_abilities(abilities: &[AbilityScore]) -> Result<()> {
        let mut seen = Vec::with_capacity(abilities.len());
        for ability in abilities {
            if seen.contains(&ability.ability_id) {
                anyhow::bail!("Duplicate ability score: {}", ability.ability_id);
            }
            seen.push(ability.ability_id);
            if !(1..=30).contains(&ability.base_score) {
                anyhow::bail!("Ability scores must be between 1 and 30");
            }
        }
        Ok(())
    }

    fn validate_classes(classes: &[ClassLevel]) -> Result<()> {
        let mut seen = Vec::with_capacity(classes.len());
        for class in classes {
            if seen.contains(&class.class_id) {
                anyhow::bail!("Duplicate class level: {}", class.class_id);
            }
            seen.push(class.class_id);
            if !(1..=20).contains(&class.level) {
                anyhow::bail!("Class levels must be between 1 and 20");
            }
        }
        Ok(())
    }

    async fn ensure_race_exists(&self, race_id: RaceId) -> Result<()> {
        self.repository
            .races()
            .get(race_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Race not found: {}", race_id))?;
        Ok(())
    }
}

#[async_trait]
impl StatBlockService for StatBlockServiceImpl {
    #[instrument(skip(self, new), fields(name = %new.name))]
    async fn create_stat_block(&self, new: NewStatBlock) -> Result<StatBlock> {
        Self::validate_name(&new.name)?;
        Self::validate_abilities(&new.abilities)?;
        Self::validate_classes(&new.classes)?;
        if let Some(race_id) = new.race_id {
            self.ensure_race_exists(race_id).await?;
        }

        self.repository.stat_blocks().create(new).await
    }

    #[instrument(skip(self))]
    async fn get_stat_block(&self, id: StatBlockId) -> Result<Option<StatBlock>> {
        self.repository.stat_blocks().get(id).await
    }

    #[instrument(skip(self))]
    async fn list_stat_blocks(&self) -> Result<Vec<StatBlock>> {
        self.repository.stat_blocks().list().await
    }

    #[instrument(skip(self, request))]
    async fn update_stat_block(
        &self,
        id: StatBlockId,
        request: UpdateStatBlockRequest,
    ) -> Result<StatBlock> {
        let mut block = self
            .repository
            .stat_blocks()
            .get(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Stat block not found: {}", id))?;

        if let Some(name) = request.name {
            block.name = name;
        }
        if let Some(race_id) = request.race_id {
            if let Some(race_id) = race_id {
                self.ensure_race_exists(race_id).await?;
            }
            block.race_id = race_id;
        }
        if let Some(abilities) = request.abilities {
            block.abilities = abilities;
        }
        if let Some(skills) = request.skills {
            block.skills = skills;
        }
        if let Some(saving_throws) = request.saving_throws {
            block.saving_throws = saving_throws;
        }
        if let Some(armor_bonuses) = request.armor_bonuses {
            block.armor_bonuses = armor_bonuses;
        }

        Self::validate_name(&block.name)?;
        Self::validate_abilities(&block.abilities)?;

        self.repository.stat_blocks().update(&block).await?;
        Ok(block)
    }

    #[instrument(skip(self, classes))]
    async fn set_class_levels(
        &self,
        id: StatBlockId,
        classes: Vec<ClassLevel>,
    ) -> Result<StatBlock> {
        Self::validate_classes(&classes)?;

        let mut block = self
            .repository
            .stat_blocks()
            .get(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Stat block not found: {}", id))?;

        self.repository.stat_blocks().set_class_levels(id, &classes).await?;
        block.classes = classes;
        Ok(block)
    }

    #[instrument(skip(self))]
    async fn delete_stat_block(&self, id: StatBlockId) -> Result<()> {
        if !self.repository.stat_blocks().delete(id).await? {
            anyhow::bail!("Stat block not found: {}", id);
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn character_sheet(&self, id: StatBlockId) -> Result<CharacterSheet> {
        let block = self
            .repository
            .stat_blocks()
            .get(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Stat block not found: {}", id))?;

        let race = match block.race_id {
            Some(race_id) => self.repository.races().get(race_id).await?,
            None => None,
        };

        let reference = self.repository.reference();
        let abilities = reference.list_abilities().await?;
        let skills = reference.list_skills().await?;

        Ok(CharacterSheet::derive(
            &block,
            race.as_ref(),
            &abilities,
            &skills,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{AbilityId, ClassId};

    #[test]
    fn test_validate_abilities_rejects_duplicates_and_bounds() {
        let dup = vec![
            AbilityScore {
                ability_id: AbilityId::new(1),
                base_score: 10,
                other_bonuses: vec![],
            },
            AbilityScore {
                ability_id: AbilityId::new(1),
                base_score: 12,
                other_bonuses: vec![],
            },
        ];
        assert!(StatBlockServiceImpl::validate_abilities(&dup).is_err());

        let out_of_bounds = vec![AbilityScore {
            ability_id: AbilityId::new(1),
            base_score: 31,
            other_bonuses: vec![],
        }];
        assert!(StatBlockServiceImpl::validate_abilities(&out_of_bounds).is_err());

        let fine = vec![AbilityScore {
            ability_id: AbilityId::new(1),
            base_score: 18,
            other_bonuses: vec![],
        }];
        assert!(StatBlockServiceImpl::validate_abilities(&fine).is_ok());
    }

    #[test]
    fn test_validate_classes_rejects_duplicates_and_bounds() {
        let dup = vec![
            ClassLevel {
                class_id: ClassId::new(1),
                level: 2,
            },
            ClassLevel {
                class_id: ClassId::new(1),
                level: 3,
            },
        ];
        assert!(StatBlockServiceImpl::validate_classes(&dup).is_err());

        let out_of_bounds = vec![ClassLevel {
            class_id: ClassId::new(1),
            level: 21,
        }];
        assert!(StatBlockServiceImpl::validate_classes(&out_of_bounds).is_err());

        let multiclass = vec![
            ClassLevel {
                class_id: ClassId::new(1),
                level: 3,
            },
            ClassLevel {
                class_id: ClassId::new(2),
                level: 2,
            },
        ];
        assert!(StatBlockServiceImpl::validate_classes(&multiclass).is_ok());
    }
}
