//! Reference data DTOs

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Ability, Class, CoinType, DamageType, SchoolOfMagic, Skill};

/// A simple named row (schools, damage types)
#[derive(Debug, Clone, Serialize)]
pub struct NamedDto {
    pub id: i64,
    pub name: String,
}

impl From<SchoolOfMagic> for NamedDto {
    fn from(school: SchoolOfMagic) -> Self {
        Self {
            id: school.id.as_i64(),
            name: school.name,
        }
    }
}

impl From<DamageType> for NamedDto {
    fn from(damage_type: DamageType) -> Self {
        Self {
            id: damage_type.id.as_i64(),
            name: damage_type.name,
        }
    }
}

impl From<Class> for NamedDto {
    fn from(class: Class) -> Self {
        Self {
            id: class.id.as_i64(),
            name: class.name,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CoinTypeDto {
    pub id: i64,
    pub name: String,
    pub abbreviation: String,
    pub value: i64,
}

impl From<CoinType> for CoinTypeDto {
    fn from(coin: CoinType) -> Self {
        Self {
            id: coin.id.as_i64(),
            name: coin.name,
            abbreviation: coin.abbreviation,
            value: coin.value,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AbilityDto {
    pub id: i64,
    pub name: String,
    pub abbreviation: String,
}

impl From<Ability> for AbilityDto {
    fn from(ability: Ability) -> Self {
        Self {
            id: ability.id.as_i64(),
            name: ability.name,
            abbreviation: ability.abbreviation,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillDto {
    pub id: i64,
    pub name: String,
    pub default_ability_id: i64,
}

impl From<Skill> for SkillDto {
    fn from(skill: Skill) -> Self {
        Self {
            id: skill.id.as_i64(),
            name: skill.name,
            default_ability_id: skill.default_ability_id.as_i64(),
        }
    }
}

/// Payload for creating a named reference row
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNamedRequestDto {
    pub name: String,
}
