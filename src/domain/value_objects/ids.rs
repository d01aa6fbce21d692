//! Strongly-typed identifiers for domain entities
//!
//! Row ids are integer primary keys assigned by SQLite; the newtypes keep
//! a spell id from being handed to a query that expects a class id.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            Serialize,
            Deserialize,
            sqlx::Type,
        )]
        #[sqlx(transparent)]
        pub struct $name(i64);

        impl $name {
            pub fn new(raw: i64) -> Self {
                Self(raw)
            }

            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(SchoolId);
define_id!(DamageTypeId);
define_id!(CoinTypeId);
define_id!(AbilityId);
define_id!(SkillId);
define_id!(ClassId);
define_id!(SpellId);
define_id!(StatBlockId);
define_id!(UserId);
define_id!(EventId);
define_id!(ItemId);
define_id!(RaceId);
