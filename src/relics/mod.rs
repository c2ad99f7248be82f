//! Relics: passive items that react to hook events for the rest of a run.
//!
//! ## Key Components
//!
//! - [`RelicDefinition`]: Rarity, listing data and event reactions
//! - [`RelicRegistry`]: Definition lookup and the shipped relics
//! - [`RelicSet`]: The relics held in a run, with per-relic counters

mod definition;
mod registry;
mod set;

pub use definition::{Gate, ReactionFn, RelicDefinition, RelicRarity, RelicReaction};
pub use registry::{RelicRegistry, BURN_BONUS, FIRST_CARD_DISCOUNT};
pub use set::{RelicListing, RelicRecord, RelicSet};
