//! Run persistence.
//!
//! [`RunSnapshot`] captures the engine-owned part of a run (status lists and
//! the synergy window) and encodes it with bincode or JSON. Hosts plug their
//! storage in through [`SaveStore`]; [`MemoryStore`] is the in-process
//! implementation.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use flavor_combat::core::{Actor, ActorId, EffectContext};
//! use flavor_combat::hooks::HookBus;
//! use flavor_combat::persistence::{MemoryStore, RunSnapshot, SaveStore};
//! use flavor_combat::status::{StatusEngine, StatusRegistry};
//! use flavor_combat::synergy::{ComboRegistry, SynergyDetector};
//!
//! let engine = StatusEngine::new(Arc::new(StatusRegistry::standard()));
//! let detector = SynergyDetector::new(Arc::new(ComboRegistry::standard()), engine.clone());
//! let mut bus = HookBus::new();
//! let mut ctx = EffectContext::new(Actor::combatant(ActorId::new(0), "Chef", 30));
//! engine.apply_status(&mut bus, &mut ctx.player, "Regen", 2, 3).unwrap();
//!
//! let store = MemoryStore::new();
//! store.save_run(&RunSnapshot::capture(&ctx, &engine, &detector)).unwrap();
//!
//! let loaded = store.load_run().unwrap().unwrap();
//! assert_eq!(loaded.actors[0].statuses[0].name, "Regen");
//! ```

mod snapshot;
mod store;

pub use snapshot::{ActorSnapshot, RunSnapshot, SNAPSHOT_VERSION};
pub use store::{MemoryStore, SaveStore};
