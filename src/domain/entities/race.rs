//! Race entity

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{AbilityId, RaceId};

/// A fixed ability score increase granted by a race
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RacialBonus {
    pub ability_id: AbilityId,
    pub bonus: i64,
}

/// A playable race with its ability score increases
#[derive(Debug, Clone)]
pub struct Race {
    pub id: RaceId,
    pub name: String,
    pub description: Option<String>,
    /// Walking speed in feet
    pub speed: i64,
    pub ability_bonuses: Vec<RacialBonus>,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

impl Race {
    pub fn bonus_for(&self, ability_id: AbilityId) -> i64 {
        self.ability_bonuses
            .iter()
            .find(|b| b.ability_id == ability_id)
            .map(|b| b.bonus)
            .unwrap_or(0)
    }
}

/// Field set for a race that has not been persisted yet
#[derive(Debug, Clone)]
pub struct NewRace {
    pub name: String,
    pub description: Option<String>,
    pub speed: i64,
    pub ability_bonuses: Vec<RacialBonus>,
}
