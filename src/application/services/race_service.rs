//! Race service - application use cases for playable races

use anyhow::Result;
use async_trait::async_trait;
use tracing::instrument;

use crate::domain::entities::{NewRace, Race, RacialBonus};
use crate::domain::value_objects::RaceId;
use crate::infrastructure::persistence::SqliteRepository;

/// Request to update an existing race. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateRaceRequest {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub speed: Option<i64>,
    pub ability_bonuses: Option<Vec<RacialBonus>>,
}

/// Race service trait defining the application use cases
#[async_trait]
pub trait RaceService: Send + Sync {
    /// Create a new race
    async fn create_race(&self, new: NewRace) -> Result<Race>;

    /// Get a race by ID
    async fn get_race(&self, id: RaceId) -> Result<Option<Race>>;

    /// List all races
    async fn list_races(&self) -> Result<Vec<Race>>;

    /// Update a race
    async fn update_race(&self, id: RaceId, request: UpdateRaceRequest) -> Result<Race>;

    /// Delete a race
    async fn delete_race(&self, id: RaceId) -> Result<()>;
}

/// Default implementation of RaceService using the SQLite repository
pub struct RaceServiceImpl {
    repository: SqliteRepository,
}

impl RaceServiceImpl {
    pub fn new(repository: SqliteRepository) -> Self {
        Self { repository }
    }

    fn validate_race(name: &str, speed: i64, bonuses: &[RacialBonus]) -> Result<()> {
        if name.trim().is_empty() {
            anyhow::bail!("Race name cannot be empty");
        }
        if name.len() > 256 {
            anyhow::bail!("Race name cannot exceed 256 characters");
        }
        if speed <= 0 {
            anyhow::bail!("Race speed must be positive");
        }

        let mut seen = Vec::with_capacity(bonuses.len());
        for bonus in bonuses {
            if seen.contains(&bonus.ability_id) {
                anyhow::bail!("Duplicate racial bonus for ability: {}", bonus.ability_id);
            }
            seen.push(bonus.ability_id);
        }
        Ok(())
    }
}

#[async_trait]
impl RaceService for RaceServiceImpl {
    #[instrument(skip(self, new), fields(name = %new.name))]
    async fn create_race(&self, new: NewRace) -> Result<Race> {
        Self::validate_race(&new.name, new.speed, &new.ability_bonuses)?;
        self.repository.races().create(new).await
    }

    #[instrument(skip(self))]
    async fn get_race(&self, id: RaceId) -> Result<Option<Race>> {
        self.repository.races().get(id).await
    }

    #[instrument(skip(self))]
    async fn list_races(&self) -> Result<Vec<Race>> {
        self.repository.races().list().await
    }

    #[instrument(skip(self, request))]
    async fn update_race(&self, id: RaceId, request: UpdateRaceRequest) -> Result<Race> {
        let mut race = self
            .repository
            .races()
            .get(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Race not found: {}", id))?;

        if let Some(name) = request.name {
            race.name = name;
        }
        if let Some(description) = request.description {
            race.description = description;
        }
        if let Some(speed) = request.speed {
            race.speed = speed;
        }
        if let Some(ability_bonuses) = request.ability_bonuses {
            race.ability_bonuses = ability_bonuses;
        }

        Self::validate_race(&race.name, race.speed, &race.ability_bonuses)?;

        self.repository.races().update(&race).await?;
        Ok(race)
    }

    #[instrument(skip(self))]
    async fn delete_race(&self, id: RaceId) -> Result<()> {
        if !self.repository.races().delete(id).await? {
            anyhow::bail!("Race not found: {}", id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::AbilityId;

    #[test]
    fn test_validate_rejects_duplicate_bonus_abilities() {
        let bonuses = vec![
            RacialBonus {
                ability_id: AbilityId::new(1),
                bonus: 2,
            },
            RacialBonus {
                ability_id: AbilityId::new(1),
                bonus: 1,
            },
        ];
        assert!(RaceServiceImpl::validate_race("Dwarf", 25, &bonuses).is_err());
    }

    #[test]
    fn test_validate_rejects_nonpositive_speed() {
        assert!(RaceServiceImpl::validate_race("Dwarf", 0, &[]).is_err());
        assert!(RaceServiceImpl::validate_race("Dwarf", -5, &[]).is_err());
        assert!(RaceServiceImpl::validate_race("Dwarf", 25, &[]).is_ok());
    }
}
