//! Derived character-sheet arithmetic
//!
//! Closed-form formulas over already-loaded data: ability and skill
//! modifiers, saving throws, proficiency bonus, armor score. Pure
//! functions feeding the sheet projection endpoint.

use crate::domain::value_objects::{Bonus, Proficiency};

/// Modifier derived from an ability score: `floor((score - 10) / 2)`.
/// A score of 10 or 11 is +0, 8 is -1, 20 is +5.
pub fn ability_modifier(score: i64) -> i64 {
    (score - 10).div_euclid(2)
}

/// Proficiency bonus for a total character level: +2 at level 1, stepping
/// up every four levels (+6 at level 17). Levels below 1 are clamped.
pub fn proficiency_bonus(total_level: i64) -> i64 {
    2 + (total_level.max(1) - 1) / 4
}

/// Effective ability score: base plus racial increase plus named bonuses
pub fn ability_score(base: i64, racial_bonus: i64, other_bonuses: &[Bonus]) -> i64 {
    base + racial_bonus + other_bonuses.iter().map(|b| b.value).sum::<i64>()
}

/// Saving throw modifier for an effective score
pub fn saving_throw_modifier(score: i64, proficient: bool, proficiency_bonus: i64) -> i64 {
    ability_modifier(score) + if proficient { proficiency_bonus } else { 0 }
}

/// Skill modifier for an effective score of the skill's governing ability
pub fn skill_modifier(score: i64, proficiency: Proficiency, proficiency_bonus: i64) -> i64 {
    ability_modifier(score) + proficiency.multiplier() * proficiency_bonus
}

/// Unarmored armor score: 10 plus the dexterity modifier plus armor bonuses
pub fn armor_score(dexterity_score: i64, armor_bonuses: &[Bonus]) -> i64 {
    10 + ability_modifier(dexterity_score) + armor_bonuses.iter().map(|b| b.value).sum::<i64>()
}

/// Render a bonus list as `"+2 (Ring of Protection), -1 (Cursed)"`.
/// An empty list renders as an empty string.
pub fn format_bonuses(bonuses: &[Bonus]) -> String {
    bonuses
        .iter()
        .map(|b| format!("{:+} ({})", b.value, b.source))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ability_modifier_floors_toward_negative() {
        assert_eq!(ability_modifier(1), -5);
        assert_eq!(ability_modifier(8), -1);
        assert_eq!(ability_modifier(9), -1);
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(12), 1);
        assert_eq!(ability_modifier(15), 2);
        assert_eq!(ability_modifier(20), 5);
        assert_eq!(ability_modifier(30), 10);
    }

    #[test]
    fn test_proficiency_bonus_steps() {
        assert_eq!(proficiency_bonus(1), 2);
        assert_eq!(proficiency_bonus(4), 2);
        assert_eq!(proficiency_bonus(5), 3);
        assert_eq!(proficiency_bonus(8), 3);
        assert_eq!(proficiency_bonus(9), 4);
        assert_eq!(proficiency_bonus(13), 5);
        assert_eq!(proficiency_bonus(17), 6);
        assert_eq!(proficiency_bonus(20), 6);
        // Degenerate input clamps instead of underflowing
        assert_eq!(proficiency_bonus(0), 2);
    }

    #[test]
    fn test_ability_score_sums_all_sources() {
        let bonuses = vec![Bonus::new("Manual of Gainful Exercise", 2)];
        assert_eq!(ability_score(15, 2, &bonuses), 19);
        assert_eq!(ability_score(15, 0, &[]), 15);
    }

    #[test]
    fn test_saving_throw_modifier() {
        assert_eq!(saving_throw_modifier(14, false, 3), 2);
        assert_eq!(saving_throw_modifier(14, true, 3), 5);
        assert_eq!(saving_throw_modifier(8, true, 2), 1);
    }

    #[test]
    fn test_skill_modifier_applies_expertise() {
        assert_eq!(skill_modifier(14, Proficiency::None, 3), 2);
        assert_eq!(skill_modifier(14, Proficiency::Proficient, 3), 5);
        assert_eq!(skill_modifier(14, Proficiency::Expertise, 3), 8);
    }

    #[test]
    fn test_armor_score() {
        assert_eq!(armor_score(10, &[]), 10);
        assert_eq!(armor_score(16, &[]), 13);
        let bonuses = vec![Bonus::new("Leather Armor", 1), Bonus::new("Shield", 2)];
        assert_eq!(armor_score(14, &bonuses), 15);
    }

    #[test]
    fn test_format_bonuses() {
        assert_eq!(format_bonuses(&[]), "");
        let bonuses = vec![
            Bonus::new("Ring of Protection", 2),
            Bonus::new("Cursed", -1),
        ];
        assert_eq!(
            format_bonuses(&bonuses),
            "+2 (Ring of Protection), -1 (Cursed)"
        );
    }
}
