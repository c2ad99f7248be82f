//! Run modifier definitions.

use serde::{Deserialize, Serialize};

use crate::effects::Effect;

/// How much a modifier raises the run's difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A passive reaction of an active modifier to a hook event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifierReaction {
    /// Event name the reaction listens to.
    pub event: String,

    /// What the reaction does to the context.
    pub effect: Effect,

    /// Message reported when the effect took.
    pub message: String,
}

impl ModifierReaction {
    /// Create a reaction.
    pub fn new(event: impl Into<String>, effect: Effect, message: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            effect,
            message: message.into(),
        }
    }
}

/// Static run modifier definition.
///
/// `effect` is resolved once, when the modifier is added to a run. The
/// reactions keep working for as long as it stays active.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifierDefinition {
    /// Unique ID, e.g. `"high-heat"`.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Difficulty tier.
    pub difficulty: Difficulty,

    /// Display icon.
    #[serde(default)]
    pub icon: String,

    /// Short description for listings.
    #[serde(default)]
    pub description: String,

    /// Applied when the modifier is added.
    pub effect: Effect,

    /// Reported when the modifier is added.
    #[serde(default)]
    pub message: String,

    /// Passive reactions, in declaration order.
    #[serde(default)]
    pub reactions: Vec<ModifierReaction>,
}

impl ModifierDefinition {
    /// Create a modifier.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        difficulty: Difficulty,
        effect: Effect,
    ) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            message: format!("{name} active"),
            name,
            difficulty,
            icon: String::new(),
            description: String::new(),
            effect,
            reactions: Vec::new(),
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

    /// Set the activation message (builder pattern).
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add a passive reaction (builder pattern).
    #[must_use]
    pub fn with_reaction(mut self, reaction: ModifierReaction) -> Self {
        self.reactions.push(reaction);
        self
    }
}
