//! Spell entity and its creation payload

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{ClassId, ComponentType, DamageTypeId, SchoolId, SpellId};

/// A spell, with its component set and class/damage-type associations
#[derive(Debug, Clone)]
pub struct Spell {
    pub id: SpellId,
    pub name: String,
    pub ritual: bool,
    /// 0 for cantrips, 1..=9 for leveled spells
    pub level: i64,
    pub school_id: SchoolId,
    /// Casting time in actions
    pub casting_time: i64,
    pub range: String,
    pub components: Vec<ComponentType>,
    pub material_components: Option<String>,
    pub description: Option<String>,
    pub higher_levels: Option<String>,
    pub classes: Vec<ClassId>,
    pub damage_types: Vec<DamageTypeId>,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

/// Field set for a spell that has not been persisted yet
#[derive(Debug, Clone)]
pub struct NewSpell {
    pub name: String,
    pub ritual: bool,
    pub level: i64,
    pub school_id: SchoolId,
    pub casting_time: i64,
    pub range: String,
    pub components: Vec<ComponentType>,
    pub material_components: Option<String>,
    pub description: Option<String>,
    pub higher_levels: Option<String>,
    pub classes: Vec<ClassId>,
    pub damage_types: Vec<DamageTypeId>,
}
