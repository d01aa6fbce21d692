//! Spell request/response DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Spell;

/// Spell representation returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct SpellDto {
    pub id: i64,
    pub name: String,
    pub ritual: bool,
    pub level: i64,
    pub school_id: i64,
    pub casting_time: i64,
    pub range: String,
    /// Component codes, e.g. `["V", "S", "M"]`
    pub components: Vec<String>,
    pub material_components: Option<String>,
    pub description: Option<String>,
    pub higher_levels: Option<String>,
    pub class_ids: Vec<i64>,
    pub damage_type_ids: Vec<i64>,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

impl From<Spell> for SpellDto {
    fn from(spell: Spell) -> Self {
        Self {
            id: spell.id.as_i64(),
            name: spell.name,
            ritual: spell.ritual,
            level: spell.level,
            school_id: spell.school_id.as_i64(),
            casting_time: spell.casting_time,
            range: spell.range,
            components: spell
                .components
                .iter()
                .map(|c| c.code().to_string())
                .collect(),
            material_components: spell.material_components,
            description: spell.description,
            higher_levels: spell.higher_levels,
            class_ids: spell.classes.iter().map(|c| c.as_i64()).collect(),
            damage_type_ids: spell.damage_types.iter().map(|d| d.as_i64()).collect(),
            created_on: spell.created_on,
            updated_on: spell.updated_on,
        }
    }
}

/// Payload for creating a spell
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSpellRequestDto {
    pub name: String,
    #[serde(default)]
    pub ritual: bool,
    pub level: i64,
    pub school_id: i64,
    pub casting_time: i64,
    pub range: String,
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default)]
    pub material_components: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub higher_levels: Option<String>,
    #[serde(default)]
    pub class_ids: Vec<i64>,
    #[serde(default)]
    pub damage_type_ids: Vec<i64>,
}

/// Payload for updating a spell; absent fields are left untouched
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSpellRequestDto {
    pub name: Option<String>,
    pub ritual: Option<bool>,
    pub level: Option<i64>,
    pub school_id: Option<i64>,
    pub casting_time: Option<i64>,
    pub range: Option<String>,
    pub components: Option<Vec<String>>,
    pub material_components: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub higher_levels: Option<Option<String>>,
    pub class_ids: Option<Vec<i64>>,
    pub damage_type_ids: Option<Vec<i64>>,
}

/// Query-string filters for spell listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpellFilterDto {
    pub level: Option<i64>,
    pub school_id: Option<i64>,
    pub class_id: Option<i64>,
    pub ritual: Option<bool>,
    /// Case-insensitive name substring
    pub name: Option<String>,
}
