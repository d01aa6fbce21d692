//! Skill proficiency levels

use serde::{Deserialize, Serialize};

/// How strongly a stat block is trained in a skill. The multiplier is
/// applied to the proficiency bonus when computing skill modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    #[default]
    None,
    Proficient,
    Expertise,
}

impl Proficiency {
    pub fn multiplier(&self) -> i64 {
        match self {
            Proficiency::None => 0,
            Proficiency::Proficient => 1,
            Proficiency::Expertise => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Proficiency::None => "none",
            Proficiency::Proficient => "proficient",
            Proficiency::Expertise => "expertise",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Proficiency::None),
            "proficient" => Some(Proficiency::Proficient),
            "expertise" => Some(Proficiency::Expertise),
            _ => None,
        }
    }
}
