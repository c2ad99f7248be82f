//! Relic definitions.
//!
//! A relic is a passive item held for the rest of a run. It reacts to hook
//! events through a list of [`RelicReaction`]s: a gate deciding whether the
//! reaction fires, an optional [`Effect`] and an optional message. Relics
//! that need more than data can bind a code handler instead.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{EffectContext, HandlerError};
use crate::effects::Effect;
use crate::hooks::HookEvent;

/// How rare a relic is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelicRarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl RelicRarity {
    /// Wire name of the rarity.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RelicRarity::Common => "common",
            RelicRarity::Uncommon => "uncommon",
            RelicRarity::Rare => "rare",
            RelicRarity::Legendary => "legendary",
        }
    }
}

/// When a reaction fires, given that its event arrived.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "when", rename_all = "camelCase")]
pub enum Gate {
    /// Every time.
    Always,

    /// Every `n`th time, counted on the relic's own counter. The counter
    /// resets when the reaction fires.
    EveryNth { n: u32 },

    /// Only while the run state value `key` is positive. Firing sets it
    /// back to 0.
    ConsumeState { key: String },

    /// Only for `cardPlay` events whose card carries `tag`.
    CardTagged { tag: String },
}

/// One event-driven reaction of a relic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelicReaction {
    /// Event name the reaction listens to.
    pub event: String,

    /// Firing condition.
    #[serde(default = "default_gate")]
    pub gate: Gate,

    /// What firing does to the context.
    #[serde(default)]
    pub effect: Option<Effect>,

    /// Message reported when the reaction fires.
    #[serde(default)]
    pub message: Option<String>,
}

fn default_gate() -> Gate {
    Gate::Always
}

impl RelicReaction {
    /// Create a reaction that always fires and does nothing.
    pub fn on(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            gate: Gate::Always,
            effect: None,
            message: None,
        }
    }

    /// Set the gate (builder pattern).
    #[must_use]
    pub fn gated(mut self, gate: Gate) -> Self {
        self.gate = gate;
        self
    }

    /// Set the effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }

    /// Set the message (builder pattern).
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// A code-supplied relic reaction.
pub type ReactionFn =
    Arc<dyn Fn(&HookEvent, &mut EffectContext) -> Result<Option<String>, HandlerError> + Send + Sync>;

/// Static relic definition.
///
/// ## Example
///
/// ```
/// use flavor_combat::core::Stat;
/// use flavor_combat::effects::Effect;
/// use flavor_combat::hooks::ENEMY_SPAWN;
/// use flavor_combat::relics::{RelicDefinition, RelicRarity, RelicReaction};
///
/// let anchor = RelicDefinition::new("umami-anchor", "Umami Anchor", RelicRarity::Common)
///     .with_reaction(
///         RelicReaction::on(ENEMY_SPAWN)
///             .with_effect(Effect::modify(Stat::Umami, 3))
///             .with_message("Umami Anchor: +3 starting Umami"),
///     );
///
/// assert!(anchor.listens_to(ENEMY_SPAWN));
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelicDefinition {
    /// Unique ID, e.g. `"crystal-vial"`.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Rarity tier.
    pub rarity: RelicRarity,

    /// Display icon.
    #[serde(default)]
    pub icon: String,

    /// Short description for listings.
    #[serde(default)]
    pub description: String,

    /// Data reactions, in declaration order.
    #[serde(default)]
    pub reactions: Vec<RelicReaction>,

    /// Code reactions keyed by event name. Run after the data reactions.
    #[serde(skip)]
    handlers: Vec<(String, ReactionFn)>,
}

impl RelicDefinition {
    /// Create a relic with no reactions.
    pub fn new(id: impl Into<String>, name: impl Into<String>, rarity: RelicRarity) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rarity,
            icon: String::new(),
            description: String::new(),
            reactions: Vec::new(),
            handlers: Vec::new(),
        }
    }

    /// Set the icon (builder pattern).
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Set the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a data reaction (builder pattern).
    #[must_use]
    pub fn with_reaction(mut self, reaction: RelicReaction) -> Self {
        self.reactions.push(reaction);
        self
    }

    /// Bind a code reaction to an event (builder pattern).
    #[must_use]
    pub fn with_handler<F>(mut self, event: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&HookEvent, &mut EffectContext) -> Result<Option<String>, HandlerError>
            + Send
            + Sync
            + 'static,
    {
        self.handlers.push((event.into(), Arc::new(handler)));
        self
    }

    /// Check whether any reaction listens to `event`.
    #[must_use]
    pub fn listens_to(&self, event: &str) -> bool {
        self.reactions.iter().any(|r| r.event == event) || self.handlers.iter().any(|(e, _)| e == event)
    }

    pub(crate) fn handlers_for<'a>(&'a self, event: &'a str) -> impl Iterator<Item = &'a ReactionFn> + 'a {
        self.handlers
            .iter()
            .filter(move |(bound, _)| bound == event)
            .map(|(_, handler)| handler)
    }
}

impl std::fmt::Debug for RelicDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let handlers: Vec<_> = self.handlers.iter().map(|(event, _)| event).collect();
        f.debug_struct("RelicDefinition")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("rarity", &self.rarity)
            .field("reactions", &self.reactions)
            .field("handlers", &handlers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::{CARD_PLAY, TURN_END};

    #[test]
    fn test_listens_to() {
        let relic = RelicDefinition::new("lens", "Lens", RelicRarity::Rare)
            .with_reaction(RelicReaction::on(CARD_PLAY))
            .with_handler(TURN_END, |_, _| Ok(None));

        assert!(relic.listens_to(CARD_PLAY));
        assert!(relic.listens_to(TURN_END));
        assert!(!relic.listens_to("turnStart"));
        assert_eq!(relic.handlers_for(TURN_END).count(), 1);
    }

    #[test]
    fn test_json() {
        let json = r#"{
            "id": "scorch-fragment", "name": "Scorch Fragment", "rarity": "rare",
            "reactions": [{
                "event": "turnEnd",
                "gate": { "when": "everyNth", "n": 4 },
                "effect": { "type": "modifyState", "key": "burnBonus", "delta": 1 },
                "message": "Scorch Fragment: Burn intensity increased!"
            }]
        }"#;
        let relic: RelicDefinition = serde_json::from_str(json).unwrap();

        assert_eq!(relic.rarity, RelicRarity::Rare);
        assert_eq!(relic.reactions[0].gate, Gate::EveryNth { n: 4 });
        assert_eq!(
            relic.reactions[0].effect,
            Some(Effect::modify_state("burnBonus", 1))
        );
        assert!(relic.icon.is_empty());
    }

    #[test]
    fn test_debug_hides_handlers() {
        let relic = RelicDefinition::new("p1", "P1", RelicRarity::Common)
            .with_handler(TURN_END, |_, _| Ok(None));
        let debug = format!("{:?}", relic);
        assert!(debug.contains("turnEnd"));
        assert!(debug.contains("Common"));
    }
}
