//! Race DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{NewRace, Race, RacialBonus};
use crate::domain::value_objects::AbilityId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RacialBonusDto {
    pub ability_id: i64,
    pub bonus: i64,
}

/// Race representation returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct RaceDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub speed: i64,
    pub ability_bonuses: Vec<RacialBonusDto>,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

impl From<Race> for RaceDto {
    fn from(race: Race) -> Self {
        Self {
            id: race.id.as_i64(),
            name: race.name,
            description: race.description,
            speed: race.speed,
            ability_bonuses: race
                .ability_bonuses
                .into_iter()
                .map(|b| RacialBonusDto {
                    ability_id: b.ability_id.as_i64(),
                    bonus: b.bonus,
                })
                .collect(),
            created_on: race.created_on,
            updated_on: race.updated_on,
        }
    }
}

/// Payload for creating or replacing a race
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRaceRequestDto {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_speed")]
    pub speed: i64,
    #[serde(default)]
    pub ability_bonuses: Vec<RacialBonusDto>,
}

fn default_speed() -> i64 {
    30
}

impl From<CreateRaceRequestDto> for NewRace {
    fn from(req: CreateRaceRequestDto) -> Self {
        Self {
            name: req.name,
            description: req.description,
            speed: req.speed,
            ability_bonuses: req
                .ability_bonuses
                .into_iter()
                .map(|b| RacialBonus {
                    ability_id: AbilityId::new(b.ability_id),
                    bonus: b.bonus,
                })
                .collect(),
        }
    }
}
