//! Status instances - runtime status state on an actor.
//!
//! `StatusInstance` is a specific status on a specific actor: how many
//! stacks it has and how many ticks remain. The static side lives in
//! `StatusDefinition`.

use serde::{Deserialize, Serialize};

use super::definition::{StatusCategory, StatusDefinition, TickPhase};

/// A status attached to an actor.
///
/// Invariants kept by the engine: `stacks >= 1`, one instance per name per
/// actor, and no instance with `duration == 0` survives a tick pass.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusInstance {
    /// Name of the definition this instance was built from.
    pub name: String,

    /// Copied from the definition.
    pub category: StatusCategory,

    /// Copied from the definition.
    pub tick_phase: TickPhase,

    /// Magnitude.
    pub stacks: u32,

    /// Ticks remaining.
    pub duration: u32,
}

impl StatusInstance {
    /// Build an instance from its definition. Stacks are raised to 1.
    #[must_use]
    pub fn from_definition(def: &StatusDefinition, stacks: u32, duration: u32) -> Self {
        Self {
            name: def.name.clone(),
            category: def.category,
            tick_phase: def.tick_phase,
            stacks: stacks.max(1),
            duration,
        }
    }

    /// Merge a re-application: stacks add, duration takes the larger value.
    pub fn merge(&mut self, stacks: u32, duration: u32) {
        self.stacks = self.stacks.saturating_add(stacks);
        self.duration = self.duration.max(duration);
    }

    /// Count down one tick.
    pub fn decay(&mut self) {
        self.duration = self.duration.saturating_sub(1);
    }

    /// Check if no ticks remain.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.duration == 0
    }

    /// The persisted `{name, stacks, duration}` triple.
    #[must_use]
    pub fn record(&self) -> StatusRecord {
        StatusRecord {
            name: self.name.clone(),
            stacks: self.stacks,
            duration: self.duration,
        }
    }
}

/// Serializable snapshot of one status instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusRecord {
    pub name: String,
    pub stacks: u32,
    pub duration: u32,
}

impl StatusRecord {
    /// Create a record.
    pub fn new(name: impl Into<String>, stacks: u32, duration: u32) -> Self {
        Self {
            name: name.into(),
            stacks,
            duration,
        }
    }
}
