//! The run modifiers active in a run.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{EffectContext, EngineError};
use crate::effects::{EffectResolver, Resolution};
use crate::hooks::{HookBus, HookEvent};
use crate::status::StatusEngine;

use super::definition::{Difficulty, ModifierDefinition};
use super::registry::ModifierRegistry;

/// One row of a modifier listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierListing {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub difficulty: Difficulty,
}

impl From<&ModifierDefinition> for ModifierListing {
    fn from(modifier: &ModifierDefinition) -> Self {
        Self {
            id: modifier.id.clone(),
            name: modifier.name.clone(),
            description: modifier.description.clone(),
            icon: modifier.icon.clone(),
            difficulty: modifier.difficulty,
        }
    }
}

/// What adding a modifier did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Activation {
    pub listing: ModifierListing,

    /// The modifier's activation message.
    pub message: String,

    /// One result per leaf of the modifier's effect.
    pub resolutions: Vec<Resolution>,
}

/// The run modifiers chosen for a run, in the order they were added.
#[derive(Clone, Debug)]
pub struct ModifierSet {
    registry: Arc<ModifierRegistry>,
    statuses: StatusEngine,
    active: Vec<String>,
}

impl ModifierSet {
    /// Create an empty set over a registry.
    #[must_use]
    pub fn new(registry: Arc<ModifierRegistry>, statuses: StatusEngine) -> Self {
        Self {
            registry,
            statuses,
            active: Vec::new(),
        }
    }

    /// The injected registry.
    #[must_use]
    pub fn registry(&self) -> &ModifierRegistry {
        &self.registry
    }

    /// Activate a modifier and apply its effect to `ctx`.
    ///
    /// Fails with `UnknownModifier` for an unregistered ID and with
    /// `AlreadyActive` if the modifier is already active; in both cases
    /// `ctx` is untouched.
    pub fn add(
        &mut self,
        id: &str,
        ctx: &mut EffectContext,
        bus: &mut HookBus,
    ) -> Result<Activation, EngineError> {
        let Some(modifier) = self.registry.get(id) else {
            tracing::warn!(modifier = id, "unknown run modifier");
            return Err(EngineError::UnknownModifier(id.to_string()));
        };
        if self.has(id) {
            tracing::warn!(modifier = %modifier.name, "run modifier already active");
            return Err(EngineError::AlreadyActive(modifier.name.clone()));
        }

        self.active.push(id.to_string());
        let resolutions = EffectResolver::resolve(ctx, &modifier.effect, &self.statuses, bus);
        tracing::info!(
            modifier = %modifier.name,
            skipped = resolutions.iter().filter(|r| !r.is_applied()).count(),
            "run modifier active"
        );

        Ok(Activation {
            listing: ModifierListing::from(modifier),
            message: modifier.message.clone(),
            resolutions,
        })
    }

    /// Deactivate a modifier. Its activation effect is not undone.
    pub fn remove(&mut self, id: &str) -> Option<ModifierListing> {
        let index = self.active.iter().position(|active| active == id)?;
        self.active.remove(index);
        tracing::debug!(modifier = id, "run modifier removed");
        self.registry.get(id).map(ModifierListing::from)
    }

    /// Check whether a modifier is active.
    #[must_use]
    pub fn has(&self, id: &str) -> bool {
        self.active.iter().any(|active| active == id)
    }

    /// Active modifiers, in activation order.
    #[must_use]
    pub fn active(&self) -> Vec<ModifierListing> {
        self.active
            .iter()
            .filter_map(|id| self.registry.get(id))
            .map(ModifierListing::from)
            .collect()
    }

    /// Every registered modifier, for selection screens.
    #[must_use]
    pub fn available(&self) -> Vec<ModifierListing> {
        self.registry.iter().map(ModifierListing::from).collect()
    }

    /// Resolve the passive reactions of every active modifier to `event`.
    ///
    /// Returns the messages of the reactions whose effect took.
    pub fn apply_hook(&self, event: &HookEvent, ctx: &mut EffectContext, bus: &mut HookBus) -> Vec<String> {
        let name = event.name();
        let mut messages = Vec::new();

        for modifier in self.active.iter().filter_map(|id| self.registry.get(id)) {
            for reaction in modifier.reactions.iter().filter(|r| r.event == name) {
                let results = EffectResolver::resolve(ctx, &reaction.effect, &self.statuses, bus);
                if results.is_empty() || results.iter().any(Resolution::is_applied) {
                    messages.push(reaction.message.clone());
                }
            }
        }

        messages
    }

    /// Deactivate every modifier (run reset).
    pub fn reset(&mut self) {
        self.active.clear();
    }

    /// Active modifier IDs, in activation order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.active.clone()
    }

    /// Mark modifiers active again without re-applying their effects.
    ///
    /// Every ID is checked first; on `UnknownModifier` the set is left
    /// untouched.
    pub fn restore(&mut self, ids: &[String]) -> Result<(), EngineError> {
        if let Some(unknown) = ids.iter().find(|id| !self.registry.contains(id)) {
            tracing::warn!(modifier = %unknown, "snapshot references unknown run modifier");
            return Err(EngineError::UnknownModifier(unknown.clone()));
        }

        self.active.clear();
        for id in ids {
            if !self.has(id) {
                self.active.push(id.clone());
            }
        }
        Ok(())
    }
}
