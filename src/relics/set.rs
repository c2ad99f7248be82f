//! The relics held during a run.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{isolate, EffectContext, EngineError, HandlerError, Outcome};
use crate::effects::{EffectResolver, Resolution};
use crate::hooks::{HookBus, HookEvent};
use crate::status::StatusEngine;

use super::definition::{Gate, RelicDefinition, RelicRarity};
use super::registry::RelicRegistry;

/// One row of a relic listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelicListing {
    pub id: String,
    pub name: String,
    pub rarity: RelicRarity,
    pub icon: String,
    pub description: String,
}

impl From<&RelicDefinition> for RelicListing {
    fn from(relic: &RelicDefinition) -> Self {
        Self {
            id: relic.id.clone(),
            name: relic.name.clone(),
            rarity: relic.rarity,
            icon: relic.icon.clone(),
            description: relic.description.clone(),
        }
    }
}

/// A held relic and its counter, as persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelicRecord {
    pub id: String,
    #[serde(default)]
    pub counter: u32,
}

/// The relics held during a run, in acquisition order.
///
/// The host relays each hook event to [`trigger`](Self::trigger) along
/// with the shared context. Every relic reacts inside its own
/// [`isolate`] call: a relic that fails or panics reports nothing for that
/// event and the next relic still runs.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use flavor_combat::core::{Actor, ActorId, EffectContext, Stat};
/// use flavor_combat::hooks::{HookBus, HookEvent};
/// use flavor_combat::relics::{RelicRegistry, RelicSet};
/// use flavor_combat::status::{StatusEngine, StatusRegistry};
///
/// let engine = StatusEngine::new(Arc::new(StatusRegistry::standard()));
/// let mut relics = RelicSet::new(Arc::new(RelicRegistry::standard()), engine);
/// let mut bus = HookBus::new();
/// let mut ctx = EffectContext::new(Actor::new(ActorId::new(0)).with_stat(Stat::Umami, 0));
///
/// relics.add("umami-anchor").unwrap();
/// let messages = relics.trigger(&HookEvent::EnemySpawn { enemy: "Gremlin".into() }, &mut ctx, &mut bus);
///
/// assert_eq!(messages, vec!["Umami Anchor: +3 starting Umami".to_string()]);
/// assert_eq!(ctx.player.stat(Stat::Umami), Some(3));
/// ```
#[derive(Clone, Debug)]
pub struct RelicSet {
    registry: Arc<RelicRegistry>,
    statuses: StatusEngine,
    held: Vec<RelicRecord>,
}

impl RelicSet {
    /// Create an empty set over a registry.
    #[must_use]
    pub fn new(registry: Arc<RelicRegistry>, statuses: StatusEngine) -> Self {
        Self {
            registry,
            statuses,
            held: Vec::new(),
        }
    }

    /// The injected registry.
    #[must_use]
    pub fn registry(&self) -> &RelicRegistry {
        &self.registry
    }

    /// Acquire a relic.
    ///
    /// Fails with `UnknownRelic` for an unregistered ID and with
    /// `AlreadyActive` if the relic is already held.
    pub fn add(&mut self, id: &str) -> Result<RelicListing, EngineError> {
        let Some(relic) = self.registry.get(id) else {
            tracing::warn!(relic = id, "unknown relic");
            return Err(EngineError::UnknownRelic(id.to_string()));
        };
        if self.has(id) {
            tracing::warn!(relic = %relic.name, "relic already held");
            return Err(EngineError::AlreadyActive(relic.name.clone()));
        }

        self.held.push(RelicRecord {
            id: id.to_string(),
            counter: 0,
        });
        tracing::info!(relic = %relic.name, "relic acquired");
        Ok(RelicListing::from(relic))
    }

    /// Drop a held relic, returning its listing.
    pub fn remove(&mut self, id: &str) -> Option<RelicListing> {
        let index = self.held.iter().position(|r| r.id == id)?;
        self.held.remove(index);
        tracing::debug!(relic = id, "relic removed");
        self.registry.get(id).map(RelicListing::from)
    }

    /// Check whether a relic is held.
    #[must_use]
    pub fn has(&self, id: &str) -> bool {
        self.held.iter().any(|r| r.id == id)
    }

    /// Held relics, in acquisition order.
    #[must_use]
    pub fn active(&self) -> Vec<RelicListing> {
        self.held
            .iter()
            .filter_map(|r| self.registry.get(&r.id))
            .map(RelicListing::from)
            .collect()
    }

    /// Every registered relic, for selection screens.
    #[must_use]
    pub fn available(&self) -> Vec<RelicListing> {
        self.registry.iter().map(RelicListing::from).collect()
    }

    /// Number of held relics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.held.len()
    }

    /// Check if no relic is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Drop every relic (run reset).
    pub fn reset(&mut self) {
        self.held.clear();
    }

    /// Let every held relic react to `event`.
    ///
    /// Relics run in acquisition order. Returns the messages of the
    /// reactions that fired. A reaction whose effect the context could not
    /// take at all reports no message.
    pub fn trigger(&mut self, event: &HookEvent, ctx: &mut EffectContext, bus: &mut HookBus) -> Vec<String> {
        let name = event.name();
        let mut messages = Vec::new();

        for held in &mut self.held {
            let Some(relic) = self.registry.get(&held.id) else {
                tracing::warn!(relic = %held.id, "held relic has no definition");
                continue;
            };
            if !relic.listens_to(name) {
                continue;
            }

            let origin = format!("relic {} on {}", held.id, name);
            let statuses = &self.statuses;
            if let Outcome::Completed(fired) =
                isolate(&origin, || react(relic, held, event, ctx, statuses, bus))
            {
                messages.extend(fired);
            }
        }

        messages
    }

    /// Held relics and their counters, in acquisition order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<RelicRecord> {
        self.held.clone()
    }

    /// Replace the held relics with persisted records.
    ///
    /// Every ID is checked first; on `UnknownRelic` the set is left
    /// untouched. Repeated IDs keep their first record.
    pub fn restore(&mut self, records: &[RelicRecord]) -> Result<(), EngineError> {
        if let Some(unknown) = records.iter().find(|r| !self.registry.contains(&r.id)) {
            tracing::warn!(relic = %unknown.id, "snapshot references unknown relic");
            return Err(EngineError::UnknownRelic(unknown.id.clone()));
        }

        self.held.clear();
        for record in records {
            if !self.has(&record.id) {
                self.held.push(record.clone());
            }
        }
        Ok(())
    }
}

fn react(
    relic: &RelicDefinition,
    held: &mut RelicRecord,
    event: &HookEvent,
    ctx: &mut EffectContext,
    statuses: &StatusEngine,
    bus: &mut HookBus,
) -> Result<Vec<String>, HandlerError> {
    let name = event.name();
    let mut messages = Vec::new();

    for reaction in relic.reactions.iter().filter(|r| r.event == name) {
        if !opens(&reaction.gate, held, event, ctx) {
            continue;
        }
        if let Some(effect) = &reaction.effect {
            let results = EffectResolver::resolve(ctx, effect, statuses, bus);
            if !results.is_empty() && !results.iter().any(Resolution::is_applied) {
                tracing::debug!(relic = %relic.id, event = name, "relic effect skipped");
                continue;
            }
        }
        if let Some(message) = &reaction.message {
            messages.push(message.clone());
        }
    }

    for handler in relic.handlers_for(name) {
        if let Some(message) = handler(event, ctx)? {
            messages.push(message);
        }
    }

    Ok(messages)
}

fn opens(gate: &Gate, held: &mut RelicRecord, event: &HookEvent, ctx: &mut EffectContext) -> bool {
    match gate {
        Gate::Always => true,
        Gate::EveryNth { n } => {
            held.counter += 1;
            if held.counter >= *n {
                held.counter = 0;
                true
            } else {
                false
            }
        }
        Gate::ConsumeState { key } => {
            if ctx.get_state(key, 0) > 0 {
                ctx.set_state(key.clone(), 0);
                true
            } else {
                false
            }
        }
        Gate::CardTagged { tag } => {
            matches!(event, HookEvent::CardPlay { tags, .. } if tags.iter().any(|t| t == tag))
        }
    }
}
