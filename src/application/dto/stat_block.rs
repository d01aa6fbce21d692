//! Stat block and character sheet DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    AbilityScore, ClassLevel, NewStatBlock, SkillProficiency, StatBlock,
};
use crate::domain::sheet::{AbilityLine, CharacterSheet, SkillLine};
use crate::domain::value_objects::{AbilityId, Bonus, ClassId, Proficiency, RaceId, SkillId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusDto {
    pub source: String,
    pub value: i64,
}

impl From<Bonus> for BonusDto {
    fn from(b: Bonus) -> Self {
        Self {
            source: b.source,
            value: b.value,
        }
    }
}

impl From<BonusDto> for Bonus {
    fn from(b: BonusDto) -> Self {
        Bonus::new(b.source, b.value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityScoreDto {
    pub ability_id: i64,
    pub base_score: i64,
    #[serde(default)]
    pub other_bonuses: Vec<BonusDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassLevelDto {
    pub class_id: i64,
    pub level: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillProficiencyDto {
    pub skill_id: i64,
    pub proficiency: Proficiency,
}

/// Stat block representation returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct StatBlockDto {
    pub id: i64,
    pub name: String,
    pub race_id: Option<i64>,
    pub abilities: Vec<AbilityScoreDto>,
    pub classes: Vec<ClassLevelDto>,
    pub skills: Vec<SkillProficiencyDto>,
    pub saving_throws: Vec<i64>,
    pub armor_bonuses: Vec<BonusDto>,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

impl From<StatBlock> for StatBlockDto {
    fn from(block: StatBlock) -> Self {
        Self {
            id: block.id.as_i64(),
            name: block.name,
            race_id: block.race_id.map(|r| r.as_i64()),
            abilities: block
                .abilities
                .into_iter()
                .map(|a| AbilityScoreDto {
                    ability_id: a.ability_id.as_i64(),
                    base_score: a.base_score,
                    other_bonuses: a.other_bonuses.into_iter().map(BonusDto::from).collect(),
                })
                .collect(),
            classes: block
                .classes
                .into_iter()
                .map(|c| ClassLevelDto {
                    class_id: c.class_id.as_i64(),
                    level: c.level,
                })
                .collect(),
            skills: block
                .skills
                .into_iter()
                .map(|s| SkillProficiencyDto {
                    skill_id: s.skill_id.as_i64(),
                    proficiency: s.proficiency,
                })
                .collect(),
            saving_throws: block.saving_throws.iter().map(|a| a.as_i64()).collect(),
            armor_bonuses: block.armor_bonuses.into_iter().map(BonusDto::from).collect(),
            created_on: block.created_on,
            updated_on: block.updated_on,
        }
    }
}

/// Payload for creating or replacing a stat block's stored fields
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStatBlockRequestDto {
    pub name: String,
    #[serde(default)]
    pub race_id: Option<i64>,
    #[serde(default)]
    pub abilities: Vec<AbilityScoreDto>,
    #[serde(default)]
    pub classes: Vec<ClassLevelDto>,
    #[serde(default)]
    pub skills: Vec<SkillProficiencyDto>,
    #[serde(default)]
    pub saving_throws: Vec<i64>,
    #[serde(default)]
    pub armor_bonuses: Vec<BonusDto>,
}

impl From<CreateStatBlockRequestDto> for NewStatBlock {
    fn from(req: CreateStatBlockRequestDto) -> Self {
        Self {
            name: req.name,
            race_id: req.race_id.map(RaceId::new),
            abilities: req
                .abilities
                .into_iter()
                .map(|a| AbilityScore {
                    ability_id: AbilityId::new(a.ability_id),
                    base_score: a.base_score,
                    other_bonuses: a.other_bonuses.into_iter().map(Bonus::from).collect(),
                })
                .collect(),
            classes: req
                .classes
                .into_iter()
                .map(|c| ClassLevel {
                    class_id: ClassId::new(c.class_id),
                    level: c.level,
                })
                .collect(),
            skills: req
                .skills
                .into_iter()
                .map(|s| SkillProficiency {
                    skill_id: SkillId::new(s.skill_id),
                    proficiency: s.proficiency,
                })
                .collect(),
            saving_throws: req.saving_throws.into_iter().map(AbilityId::new).collect(),
            armor_bonuses: req.armor_bonuses.into_iter().map(Bonus::from).collect(),
        }
    }
}

/// Payload for replacing a stat block's class levels
#[derive(Debug, Clone, Deserialize)]
pub struct SetClassLevelsRequestDto {
    pub classes: Vec<ClassLevelDto>,
}

/// One ability line of a rendered character sheet
#[derive(Debug, Clone, Serialize)]
pub struct AbilityLineDto {
    pub ability: String,
    pub abbreviation: String,
    pub score: i64,
    pub modifier: i64,
    pub saving_throw: i64,
    pub save_proficient: bool,
    pub other_bonuses: String,
}

impl From<AbilityLine> for AbilityLineDto {
    fn from(line: AbilityLine) -> Self {
        Self {
            ability: line.ability,
            abbreviation: line.abbreviation,
            score: line.score,
            modifier: line.modifier,
            saving_throw: line.saving_throw,
            save_proficient: line.save_proficient,
            other_bonuses: line.other_bonuses,
        }
    }
}

/// One skill line of a rendered character sheet
#[derive(Debug, Clone, Serialize)]
pub struct SkillLineDto {
    pub skill: String,
    pub ability_abbreviation: String,
    pub modifier: i64,
    pub proficiency: Proficiency,
}

impl From<SkillLine> for SkillLineDto {
    fn from(line: SkillLine) -> Self {
        Self {
            skill: line.skill,
            ability_abbreviation: line.ability_abbreviation,
            modifier: line.modifier,
            proficiency: line.proficiency,
        }
    }
}

/// A rendered character sheet with every derived value computed
#[derive(Debug, Clone, Serialize)]
pub struct CharacterSheetDto {
    pub name: String,
    pub race: Option<String>,
    pub total_level: i64,
    pub proficiency_bonus: i64,
    pub armor_score: i64,
    pub abilities: Vec<AbilityLineDto>,
    pub skills: Vec<SkillLineDto>,
}

impl From<CharacterSheet> for CharacterSheetDto {
    fn from(sheet: CharacterSheet) -> Self {
        Self {
            name: sheet.name,
            race: sheet.race,
            total_level: sheet.total_level,
            proficiency_bonus: sheet.proficiency_bonus,
            armor_score: sheet.armor_score,
            abilities: sheet.abilities.into_iter().map(AbilityLineDto::from).collect(),
            skills: sheet.skills.into_iter().map(SkillLineDto::from).collect(),
        }
    }
}
