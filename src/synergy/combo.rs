//! Combo definitions.
//!
//! A combo is keyed by an ordered tag pair (`"Spice-Umami"`) and carries a
//! data-driven [`Effect`] that is resolved against the shared
//! [`EffectContext`](crate::core::EffectContext) when the pair is played.

use serde::{Deserialize, Serialize};

use crate::effects::Effect;

/// Static combo definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboDefinition {
    /// First tag of the key.
    pub first: String,

    /// Second tag of the key.
    pub second: String,

    /// Display name.
    pub name: String,

    /// Short description for listings.
    pub description: String,

    /// What the combo does.
    pub effect: Effect,

    /// Message returned and announced when the combo fires.
    pub message: String,
}

impl ComboDefinition {
    /// Create a combo for the tag pair `first`-`second`.
    pub fn new(
        first: impl Into<String>,
        second: impl Into<String>,
        name: impl Into<String>,
        effect: Effect,
    ) -> Self {
        let name = name.into();
        Self {
            first: first.into(),
            second: second.into(),
            message: format!("Synergy: {name}!"),
            description: String::new(),
            name,
            effect,
        }
    }

    /// Set the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the trigger message (builder pattern).
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// The lookup key, `"first-second"`.
    #[must_use]
    pub fn key(&self) -> String {
        combo_key(&self.first, &self.second)
    }
}

/// Build a lookup key from two tags.
#[must_use]
pub fn combo_key(first: &str, second: &str) -> String {
    format!("{first}-{second}")
}
