//! Character sheet projection - a stat block joined against its race and
//! the reference tables, with every derived value computed

use crate::domain::entities::{Ability, Race, Skill, StatBlock};
use crate::domain::modifiers;
use crate::domain::value_objects::Proficiency;

/// One ability line of a rendered sheet
#[derive(Debug, Clone)]
pub struct AbilityLine {
    pub ability: String,
    pub abbreviation: String,
    /// Effective score (base + racial + other bonuses)
    pub score: i64,
    pub modifier: i64,
    pub saving_throw: i64,
    pub save_proficient: bool,
    /// Human-readable rendering of the non-racial bonuses
    pub other_bonuses: String,
}

/// One skill line of a rendered sheet
#[derive(Debug, Clone)]
pub struct SkillLine {
    pub skill: String,
    pub ability_abbreviation: String,
    pub modifier: i64,
    pub proficiency: Proficiency,
}

/// A fully derived character sheet
#[derive(Debug, Clone)]
pub struct CharacterSheet {
    pub name: String,
    pub race: Option<String>,
    pub total_level: i64,
    pub proficiency_bonus: i64,
    pub armor_score: i64,
    pub abilities: Vec<AbilityLine>,
    pub skills: Vec<SkillLine>,
}

impl CharacterSheet {
    /// Derive a sheet from a stat block and the reference data it points at.
    /// Abilities the block stores no score for default to 10. Skills whose
    /// governing ability is missing from the reference set are skipped.
    pub fn derive(
        block: &StatBlock,
        race: Option<&Race>,
        abilities: &[Ability],
        skills: &[Skill],
    ) -> Self {
        let total_level = block.total_level();
        let proficiency_bonus = modifiers::proficiency_bonus(total_level.max(1));

        let mut ability_lines = Vec::with_capacity(abilities.len());
        let mut dexterity_score = 10;

        for ability in abilities {
            let stored = block.ability(ability.id);
            let base = stored.map(|a| a.base_score).unwrap_or(10);
            let other = stored.map(|a| a.other_bonuses.as_slice()).unwrap_or(&[]);
            let racial = race.map(|r| r.bonus_for(ability.id)).unwrap_or(0);

            let score = modifiers::ability_score(base, racial, other);
            if ability.abbreviation == "DEX" {
                dexterity_score = score;
            }

            let save_proficient = block.has_save_proficiency(ability.id);
            ability_lines.push(AbilityLine {
                ability: ability.name.clone(),
                abbreviation: ability.abbreviation.clone(),
                score,
                modifier: modifiers::ability_modifier(score),
                saving_throw: modifiers::saving_throw_modifier(
                    score,
                    save_proficient,
                    proficiency_bonus,
                ),
                save_proficient,
                other_bonuses: modifiers::format_bonuses(other),
            });
        }

        let mut skill_lines = Vec::with_capacity(skills.len());
        for skill in skills {
            let Some(governing) = ability_lines
                .iter()
                .zip(abilities)
                .find(|(_, a)| a.id == skill.default_ability_id)
            else {
                continue;
            };
            let proficiency = block.skill_proficiency(skill.id);
            skill_lines.push(SkillLine {
                skill: skill.name.clone(),
                ability_abbreviation: governing.0.abbreviation.clone(),
                modifier: modifiers::skill_modifier(
                    governing.0.score,
                    proficiency,
                    proficiency_bonus,
                ),
                proficiency,
            });
        }

        Self {
            name: block.name.clone(),
            race: race.map(|r| r.name.clone()),
            total_level,
            proficiency_bonus,
            armor_score: modifiers::armor_score(dexterity_score, &block.armor_bonuses),
            abilities: ability_lines,
            skills: skill_lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::entities::{AbilityScore, ClassLevel, RacialBonus, SkillProficiency};
    use crate::domain::value_objects::{
        AbilityId, Bonus, ClassId, RaceId, SkillId, StatBlockId,
    };

    fn ability(id: i64, name: &str, abbrev: &str) -> Ability {
        Ability {
            id: AbilityId::new(id),
            name: name.to_string(),
            abbreviation: abbrev.to_string(),
            created_on: Utc::now(),
            updated_on: Utc::now(),
        }
    }

    fn skill(id: i64, name: &str, ability_id: i64) -> Skill {
        Skill {
            id: SkillId::new(id),
            name: name.to_string(),
            default_ability_id: AbilityId::new(ability_id),
            created_on: Utc::now(),
            updated_on: Utc::now(),
        }
    }

    #[test]
    fn test_derive_full_sheet() {
        let abilities = vec![
            ability(1, "Strength", "STR"),
            ability(2, "Dexterity", "DEX"),
        ];
        let skills = vec![skill(1, "Athletics", 1), skill(2, "Stealth", 2)];

        let race = Race {
            id: RaceId::new(1),
            name: "Mountain Dwarf".to_string(),
            description: None,
            speed: 25,
            ability_bonuses: vec![RacialBonus {
                ability_id: AbilityId::new(1),
                bonus: 2,
            }],
            created_on: Utc::now(),
            updated_on: Utc::now(),
        };

        let block = StatBlock {
            id: StatBlockId::new(1),
            name: "Flinty".to_string(),
            race_id: Some(race.id),
            abilities: vec![
                AbilityScore {
                    ability_id: AbilityId::new(1),
                    base_score: 15,
                    other_bonuses: vec![Bonus::new("Gauntlets", 1)],
                },
                AbilityScore {
                    ability_id: AbilityId::new(2),
                    base_score: 14,
                    other_bonuses: vec![],
                },
            ],
            classes: vec![ClassLevel {
                class_id: ClassId::new(1),
                level: 5,
            }],
            skills: vec![SkillProficiency {
                skill_id: SkillId::new(1),
                proficiency: Proficiency::Proficient,
            }],
            saving_throws: vec![AbilityId::new(1)],
            armor_bonuses: vec![Bonus::new("Shield", 2)],
            created_on: Utc::now(),
            updated_on: Utc::now(),
        };

        let sheet = CharacterSheet::derive(&block, Some(&race), &abilities, &skills);

        assert_eq!(sheet.total_level, 5);
        assert_eq!(sheet.proficiency_bonus, 3);
        assert_eq!(sheet.race.as_deref(), Some("Mountain Dwarf"));

        // STR: 15 base + 2 racial + 1 item = 18 -> +4 modifier, +7 save
        let str_line = &sheet.abilities[0];
        assert_eq!(str_line.score, 18);
        assert_eq!(str_line.modifier, 4);
        assert!(str_line.save_proficient);
        assert_eq!(str_line.saving_throw, 7);
        assert_eq!(str_line.other_bonuses, "+1 (Gauntlets)");

        // DEX: 14 -> +2 modifier, no save proficiency
        let dex_line = &sheet.abilities[1];
        assert_eq!(dex_line.score, 14);
        assert_eq!(dex_line.saving_throw, 2);

        // Armor: 10 + 2 (DEX) + 2 (shield)
        assert_eq!(sheet.armor_score, 14);

        // Athletics proficient: +4 STR + 3 prof; Stealth untrained: +2
        assert_eq!(sheet.skills[0].modifier, 7);
        assert_eq!(sheet.skills[1].modifier, 2);
    }

    #[test]
    fn test_derive_defaults_missing_scores_to_ten() {
        let abilities = vec![ability(2, "Dexterity", "DEX")];
        let block = StatBlock {
            id: StatBlockId::new(1),
            name: "Commoner".to_string(),
            race_id: None,
            abilities: vec![],
            classes: vec![],
            skills: vec![],
            saving_throws: vec![],
            armor_bonuses: vec![],
            created_on: Utc::now(),
            updated_on: Utc::now(),
        };

        let sheet = CharacterSheet::derive(&block, None, &abilities, &[]);
        assert_eq!(sheet.abilities[0].score, 10);
        assert_eq!(sheet.abilities[0].modifier, 0);
        assert_eq!(sheet.armor_score, 10);
        // Level 0 block still gets the level-1 proficiency bonus
        assert_eq!(sheet.proficiency_bonus, 2);
    }
}
