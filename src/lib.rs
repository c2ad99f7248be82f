//! # flavor-combat
//!
//! Effect resolution engine for a flavor-themed deck-building card game.
//!
//! ## Design Principles
//!
//! 1. **Explicit Registries**: Status and combo tables are built once at
//!    startup and injected into the components that read them. There is no
//!    process-wide mutable state.
//!
//! 2. **Isolated Extensions**: Every call into code the engine does not own
//!    (hook handlers, custom status ticks, relic reactions) goes through
//!    `isolate`. An extension that fails or panics is logged and skipped; it
//!    never halts the turn.
//!
//! 3. **Tolerant Actors**: Actors carry only the stats they have. Engine
//!    logic branches on each actor's `Capabilities` instead of assuming a
//!    fixed record shape.
//!
//! ## Architecture
//!
//! - **Phase-Synchronous**: The host drives turn phases and calls
//!   `StatusEngine::tick_statuses` at each boundary and
//!   `SynergyDetector::record_play` on card plays.
//!
//! - **Relayed Reactors**: Relics and run modifiers need the effect
//!   context, so the host passes each event to `RelicSet::trigger` and
//!   `ModifierSet::apply_hook` next to `HookBus::dispatch`.
//!
//! - **Persistent Status Lists**: Statuses live in an `im::Vector`, so a tick
//!   pass iterates an O(1) snapshot taken at phase entry.
//!
//! ## Modules
//!
//! - `core`: Actors, the effect context, configuration, errors, isolation
//! - `status`: Status definitions, registry and the status engine
//! - `effects`: Effect data shared by combos, relics and modifiers
//! - `synergy`: Tag window, combos and the synergy detector
//! - `relics`: Held relics reacting to hook events
//! - `modifiers`: Run modifiers chosen at run start
//! - `hooks`: Hook bus and events
//! - `persistence`: Run snapshots and save stores
//! - `achievements`: Milestone tracking fed by gameplay events

pub mod core;
pub mod status;
pub mod effects;
pub mod synergy;
pub mod relics;
pub mod modifiers;
pub mod hooks;
pub mod persistence;
pub mod achievements;

// Re-export commonly used types
pub use crate::core::{
    Actor, ActorId, Capabilities, Stat,
    EffectContext, EngineConfig,
    EngineError, HandlerError,
    isolate, Failure, Outcome,
};

pub use crate::status::{
    Amount, EffectDescriptor, EffectKind,
    StatusCategory, StatusDefinition, StatusEngine, StatusInstance, StatusRecord,
    StatusRegistry, TickPhase, TickRule,
};

pub use crate::effects::{Effect, EffectResolver, Resolution};

pub use crate::synergy::{ComboDefinition, ComboRegistry, SynergyDetector, SynergyWindow};

pub use crate::relics::{RelicDefinition, RelicRegistry, RelicSet};

pub use crate::modifiers::{ModifierDefinition, ModifierRegistry, ModifierSet};

pub use crate::hooks::{DispatchReport, HookBus, HookEvent, HookId, HookInfo, HookRegistration};

pub use crate::persistence::{MemoryStore, RunSnapshot, SaveStore};

pub use crate::achievements::{AchievementBook, GameplayEvent};
