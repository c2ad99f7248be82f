//! Run modifiers: difficulty options chosen at the start of a run.
//!
//! A modifier applies an [`Effect`](crate::effects::Effect) once when it is
//! added and may keep passive reactions to host events (e.g. `enemyAction`)
//! while it stays active.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use flavor_combat::core::{Actor, ActorId, EffectContext, Stat};
//! use flavor_combat::hooks::HookBus;
//! use flavor_combat::modifiers::{ModifierRegistry, ModifierSet};
//! use flavor_combat::status::{StatusEngine, StatusRegistry};
//!
//! let engine = StatusEngine::new(Arc::new(StatusRegistry::standard()));
//! let mut modifiers = ModifierSet::new(Arc::new(ModifierRegistry::standard()), engine);
//! let mut bus = HookBus::new();
//! let player = Actor::new(ActorId::new(0))
//!     .with_stat(Stat::Energy, 3)
//!     .with_stat(Stat::BaseEnergy, 3);
//! let mut ctx = EffectContext::new(player);
//!
//! let activation = modifiers.add("energy-surge", &mut ctx, &mut bus).unwrap();
//! assert_eq!(activation.message, "Energy Surge active: +1 energy, -1 hand size");
//! assert_eq!(ctx.player.stat(Stat::Energy), Some(4));
//! ```

mod definition;
mod registry;
mod set;

pub use definition::{Difficulty, ModifierDefinition, ModifierReaction};
pub use registry::{ModifierRegistry, BURN_CHANCE, BURN_MULTIPLIER, MAX_HAND};
pub use set::{Activation, ModifierListing, ModifierSet};
