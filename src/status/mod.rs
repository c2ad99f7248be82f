//! Status effects: definitions, instances and the engine that drives them.
//!
//! Statuses are timed, stackable modifiers attached to actors. Their static
//! side ([`StatusDefinition`]) lives in a [`StatusRegistry`]; the runtime side
//! ([`StatusInstance`]) lives on the [`Actor`](crate::core::Actor).
//!
//! ## Lifecycle
//!
//! 1. `apply_status` creates an instance or merges into the existing one
//!    (stacks add, duration takes the max) and dispatches `statusApplied`.
//! 2. `tick_statuses` runs every instance of the requested phase, counts
//!    each one down, then drops whatever has expired.
//! 3. `get_status_modifier` / `get_percent_modifier` let damage and stat
//!    code read the effect descriptors of what is currently attached.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use flavor_combat::core::{Actor, ActorId, Stat};
//! use flavor_combat::hooks::HookBus;
//! use flavor_combat::status::{StatusEngine, StatusRegistry, TickPhase};
//!
//! let engine = StatusEngine::new(Arc::new(StatusRegistry::standard()));
//! let mut bus = HookBus::new();
//! let mut slime = Actor::combatant(ActorId::new(1), "Slime", 20);
//!
//! engine.apply_status(&mut bus, &mut slime, "Burn", 3, 2).unwrap();
//! let messages = engine.tick_statuses(&mut slime, TickPhase::EndTurn);
//!
//! assert_eq!(messages, vec!["Slime suffers 3 Burn damage".to_string()]);
//! assert_eq!(slime.stat(Stat::Hp), Some(17));
//! ```

mod definition;
mod engine;
mod instance;
mod registry;

pub use definition::{
    Amount, EffectDescriptor, EffectKind, StatusCategory, StatusDefinition, TickFn, TickPhase,
    TickRule,
};
pub use engine::{Application, StatusEngine};
pub use instance::{StatusInstance, StatusRecord};
pub use registry::StatusRegistry;
