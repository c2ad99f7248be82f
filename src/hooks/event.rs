//! Hook events.
//!
//! Events are identified on the bus by name. The engine produces
//! `statusApplied` and `synergyTriggered` itself; the host game loop relays
//! `cardPlay`, `turnStart`, `turnEnd` and `enemySpawn` through the same bus.
//! The engine does not interpret host events, it only delivers them.

use serde::{Deserialize, Serialize};

use crate::core::ActorId;

/// Sent once to a registration's `init` handler when it is registered.
/// `HookBus::dispatch` refuses events with this name.
pub const INIT: &str = "init";
/// A status was applied or merged onto an actor.
pub const STATUS_APPLIED: &str = "statusApplied";
/// A card-tag combo fired.
pub const SYNERGY_TRIGGERED: &str = "synergyTriggered";
/// A card was played (host event).
pub const CARD_PLAY: &str = "cardPlay";
/// A turn began (host event).
pub const TURN_START: &str = "turnStart";
/// A turn ended (host event).
pub const TURN_END: &str = "turnEnd";
/// An enemy entered combat (host event).
pub const ENEMY_SPAWN: &str = "enemySpawn";
/// An enemy took its action (host event, relayed as [`HookEvent::Custom`]).
pub const ENEMY_ACTION: &str = "enemyAction";

/// Payload of a `statusApplied` event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusApplied {
    /// The actor that received the status.
    pub target_id: ActorId,

    /// The target's name, `"unknown"` for unnamed actors.
    pub target: String,

    /// Status name.
    pub status: String,

    /// Stacks applied by this call (not the merged total).
    pub stacks: u32,

    /// Duration requested by this call.
    pub duration: u32,
}

/// Payload of a `synergyTriggered` event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynergyTriggered {
    /// Combo display name.
    pub combo: String,

    /// The two tags that matched, in play order.
    pub tags: [String; 2],

    /// The message the combo produced.
    pub result: String,

    /// Leaf effects that changed the context.
    #[serde(default)]
    pub applied: usize,

    /// Reasons for every leaf effect the context could not take.
    #[serde(default)]
    pub skipped: Vec<String>,
}

impl SynergyTriggered {
    /// Check whether the combo changed anything. A combo with no leaf
    /// effects counts as having taken effect.
    #[must_use]
    pub fn took_effect(&self) -> bool {
        self.applied > 0 || self.skipped.is_empty()
    }
}

/// An event delivered through the hook bus.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum HookEvent {
    Init,
    StatusApplied(StatusApplied),
    SynergyTriggered(SynergyTriggered),
    CardPlay { card: String, tags: Vec<String> },
    TurnStart { turn: u32 },
    TurnEnd { turn: u32 },
    EnemySpawn { enemy: String },
    /// Any other host-defined event, relayed untouched.
    Custom { name: String, data: serde_json::Value },
}

impl HookEvent {
    /// The name handlers are bound to.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            HookEvent::Init => INIT,
            HookEvent::StatusApplied(_) => STATUS_APPLIED,
            HookEvent::SynergyTriggered(_) => SYNERGY_TRIGGERED,
            HookEvent::CardPlay { .. } => CARD_PLAY,
            HookEvent::TurnStart { .. } => TURN_START,
            HookEvent::TurnEnd { .. } => TURN_END,
            HookEvent::EnemySpawn { .. } => ENEMY_SPAWN,
            HookEvent::Custom { name, .. } => name,
        }
    }

    /// Create a card play event.
    pub fn card_play(card: impl Into<String>, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        HookEvent::CardPlay {
            card: card.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a host-defined event.
    pub fn custom(name: impl Into<String>, data: serde_json::Value) -> Self {
        HookEvent::Custom {
            name: name.into(),
            data,
        }
    }
}
