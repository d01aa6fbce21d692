//! Named numeric bonuses (magic items, curses, fighting styles, ...)

use serde::{Deserialize, Serialize};

/// A flat bonus with its source, e.g. `+2 (Ring of Protection)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonus {
    pub source: String,
    pub value: i64,
}

impl Bonus {
    pub fn new(source: impl Into<String>, value: i64) -> Self {
        Self {
            source: source.into(),
            value,
        }
    }
}
