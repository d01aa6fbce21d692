//! Data transfer objects for the HTTP API and queue payloads

mod account;
mod contact;
mod event;
mod item;
mod race;
mod reference;
mod spell;
mod stat_block;

pub use account::{CreateUserRequestDto, UpdateUserRequestDto, UserDto};
pub use contact::{ContactAcceptedDto, ContactMessage, ContactRequestDto, QueueStatusDto};
pub use event::{CreateEventRequestDto, EventDto, UpdateEventRequestDto};
pub use item::{CreateItemRequestDto, ItemDto, UpdateItemRequestDto};
pub use race::{CreateRaceRequestDto, RaceDto, RacialBonusDto};
pub use reference::{
    AbilityDto, CoinTypeDto, CreateNamedRequestDto, NamedDto, SkillDto,
};
pub use spell::{CreateSpellRequestDto, SpellDto, SpellFilterDto, UpdateSpellRequestDto};
pub use stat_block::{
    AbilityLineDto, AbilityScoreDto, BonusDto, CharacterSheetDto, ClassLevelDto,
    CreateStatBlockRequestDto, SetClassLevelsRequestDto, SkillLineDto, SkillProficiencyDto,
    StatBlockDto,
};
