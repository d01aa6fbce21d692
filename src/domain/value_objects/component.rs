//! Spell component types (verbal, somatic, material)

use serde::{Deserialize, Serialize};

/// A spell casting component. A spell carries at most one of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentType {
    #[serde(rename = "V")]
    Verbal,
    #[serde(rename = "S")]
    Somatic,
    #[serde(rename = "M")]
    Material,
}

impl ComponentType {
    /// Single-letter code used in stored rows and the API ("V", "S", "M")
    pub fn code(&self) -> &'static str {
        match self {
            ComponentType::Verbal => "V",
            ComponentType::Somatic => "S",
            ComponentType::Material => "M",
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "V" => Some(ComponentType::Verbal),
            "S" => Some(ComponentType::Somatic),
            "M" => Some(ComponentType::Material),
            _ => None,
        }
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for component in [
            ComponentType::Verbal,
            ComponentType::Somatic,
            ComponentType::Material,
        ] {
            assert_eq!(ComponentType::parse(component.code()), Some(component));
        }
        assert_eq!(ComponentType::parse("X"), None);
        assert_eq!(ComponentType::parse("v"), None);
    }
}
