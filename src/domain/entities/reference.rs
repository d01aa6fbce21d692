//! Reference data - the lookup tables the rest of the schema hangs off

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{AbilityId, CoinTypeId, DamageTypeId, SchoolId, SkillId};

/// A school of magic (Evocation, Necromancy, ...)
#[derive(Debug, Clone)]
pub struct SchoolOfMagic {
    pub id: SchoolId,
    pub name: String,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

/// A damage type (Fire, Piercing, ...)
#[derive(Debug, Clone)]
pub struct DamageType {
    pub id: DamageTypeId,
    pub name: String,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

/// A coinage denomination with its value in copper pieces
#[derive(Debug, Clone)]
pub struct CoinType {
    pub id: CoinTypeId,
    pub name: String,
    pub abbreviation: String,
    /// Copper equivalence of one coin
    pub value: i64,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

/// One of the six ability scores
#[derive(Debug, Clone)]
pub struct Ability {
    pub id: AbilityId,
    pub name: String,
    pub abbreviation: String,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

/// A skill keyed to a default ability
#[derive(Debug, Clone)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub default_ability_id: AbilityId,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

/// A character class. Carries no timestamps.
#[derive(Debug, Clone)]
pub struct Class {
    pub id: crate::domain::value_objects::ClassId,
    pub name: String,
}
