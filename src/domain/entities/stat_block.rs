//! Stat block entity - a character's stored scores and proficiencies

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{
    AbilityId, Bonus, ClassId, Proficiency, RaceId, SkillId, StatBlockId,
};

/// A stored ability score with its situational bonuses
#[derive(Debug, Clone)]
pub struct AbilityScore {
    pub ability_id: AbilityId,
    pub base_score: i64,
    /// Bonuses beyond base and race (items, blessings, curses)
    pub other_bonuses: Vec<Bonus>,
}

/// A class taken by the stat block, with its level. At most one row per
/// class; the total character level is the sum over rows.
#[derive(Debug, Clone)]
pub struct ClassLevel {
    pub class_id: ClassId,
    pub level: i64,
}

/// A skill the stat block is trained in
#[derive(Debug, Clone)]
pub struct SkillProficiency {
    pub skill_id: SkillId,
    pub proficiency: Proficiency,
}

/// A character stat block
#[derive(Debug, Clone)]
pub struct StatBlock {
    pub id: StatBlockId,
    pub name: String,
    pub race_id: Option<RaceId>,
    pub abilities: Vec<AbilityScore>,
    pub classes: Vec<ClassLevel>,
    pub skills: Vec<SkillProficiency>,
    /// Abilities the block has saving-throw proficiency in
    pub saving_throws: Vec<AbilityId>,
    pub armor_bonuses: Vec<Bonus>,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

/// Field set for a stat block that has not been persisted yet
#[derive(Debug, Clone)]
pub struct NewStatBlock {
    pub name: String,
    pub race_id: Option<RaceId>,
    pub abilities: Vec<AbilityScore>,
    pub classes: Vec<ClassLevel>,
    pub skills: Vec<SkillProficiency>,
    pub saving_throws: Vec<AbilityId>,
    pub armor_bonuses: Vec<Bonus>,
}

impl StatBlock {
    /// Sum of class levels. A block with no classes is level 0.
    pub fn total_level(&self) -> i64 {
        self.classes.iter().map(|c| c.level).sum()
    }

    pub fn ability(&self, ability_id: AbilityId) -> Option<&AbilityScore> {
        self.abilities.iter().find(|a| a.ability_id == ability_id)
    }

    pub fn skill_proficiency(&self, skill_id: SkillId) -> Proficiency {
        self.skills
            .iter()
            .find(|s| s.skill_id == skill_id)
            .map(|s| s.proficiency)
            .unwrap_or_default()
    }

    pub fn has_save_proficiency(&self, ability_id: AbilityId) -> bool {
        self.saving_throws.contains(&ability_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_level_sums_multiclass() {
        let block = StatBlock {
            id: StatBlockId::new(1),
            name: "Flinty".to_string(),
            race_id: None,
            abilities: vec![],
            classes: vec![
                ClassLevel {
                    class_id: ClassId::new(1),
                    level: 3,
                },
                ClassLevel {
                    class_id: ClassId::new(2),
                    level: 2,
                },
            ],
            skills: vec![],
            saving_throws: vec![],
            armor_bonuses: vec![],
            created_on: Utc::now(),
            updated_on: Utc::now(),
        };
        assert_eq!(block.total_level(), 5);
    }

    #[test]
    fn test_skill_proficiency_defaults_to_none() {
        let block = StatBlock {
            id: StatBlockId::new(1),
            name: "Flinty".to_string(),
            race_id: None,
            abilities: vec![],
            classes: vec![],
            skills: vec![SkillProficiency {
                skill_id: SkillId::new(7),
                proficiency: Proficiency::Expertise,
            }],
            saving_throws: vec![],
            armor_bonuses: vec![],
            created_on: Utc::now(),
            updated_on: Utc::now(),
        };
        assert_eq!(
            block.skill_proficiency(SkillId::new(7)),
            Proficiency::Expertise
        );
        assert_eq!(block.skill_proficiency(SkillId::new(8)), Proficiency::None);
    }
}
