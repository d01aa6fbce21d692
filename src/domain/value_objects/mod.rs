//! Value objects - immutable domain values without identity

mod bonus;
mod component;
mod ids;
mod proficiency;
mod role;

pub use bonus::Bonus;
pub use component::ComponentType;
pub use ids::{
    AbilityId, ClassId, CoinTypeId, DamageTypeId, EventId, ItemId, RaceId, SchoolId, SkillId,
    SpellId, StatBlockId, UserId,
};
pub use proficiency::Proficiency;
pub use role::UserRole;
