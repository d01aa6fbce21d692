//! Application services

mod account_service;
mod contact_service;
mod event_service;
mod item_service;
mod race_service;
mod reference_service;
mod spell_service;
mod stat_block_service;

pub use account_service::{AccountService, AccountServiceImpl, UpdateUserRequest};
pub use contact_service::{ContactService, ContactServiceImpl};
pub use event_service::{EventService, EventServiceImpl, UpdateEventRequest};
pub use item_service::{ItemService, ItemServiceImpl, PricedItem, UpdateItemRequest};
pub use race_service::{RaceService, RaceServiceImpl, UpdateRaceRequest};
pub use reference_service::{ReferenceService, ReferenceServiceImpl};
pub use spell_service::{SpellFilter, SpellService, SpellServiceImpl, UpdateSpellRequest};
pub use stat_block_service::{StatBlockService, StatBlockServiceImpl, UpdateStatBlockRequest};
