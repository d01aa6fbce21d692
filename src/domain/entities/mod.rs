//! Domain entities

mod event;
mod item;
mod race;
mod reference;
mod spell;
mod stat_block;
mod user;

pub use event::{Event, NewEvent};
pub use item::{Item, NewItem};
pub use race::{NewRace, Race, RacialBonus};
pub use reference::{Ability, Class, CoinType, DamageType, SchoolOfMagic, Skill};
pub use spell::{NewSpell, Spell};
pub use stat_block::{
    AbilityScore, ClassLevel, NewStatBlock, SkillProficiency, StatBlock,
};
pub use user::{NewUser, User};
