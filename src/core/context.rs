//! The shared run/combat record effects read and write.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId};

/// Mutable state shared by statuses, combos and reactors.
///
/// `player` holds the run-state pools (energy, flavor stats) combos feed.
/// `enemy` is the current opponent, if a combat is in progress; combos that
/// inflict statuses target it.
///
/// `run_state` holds integer run flags written by relics and modifiers
/// (`burnBonus`, `maxHand`, `firstCardDiscount`, ...). Booleans are stored
/// as 0/1.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectContext {
    /// The player's run record.
    pub player: Actor,

    /// The current opponent.
    pub enemy: Option<Actor>,

    /// Turn number within the current combat (starts at 1).
    pub turn: u32,

    /// Run flags keyed by name.
    #[serde(default)]
    pub run_state: FxHashMap<String, i64>,
}

impl EffectContext {
    /// Create a context with no opponent.
    #[must_use]
    pub fn new(player: Actor) -> Self {
        Self {
            player,
            enemy: None,
            turn: 1,
            run_state: FxHashMap::default(),
        }
    }

    /// Set the opponent (builder pattern).
    #[must_use]
    pub fn with_enemy(mut self, enemy: Actor) -> Self {
        self.enemy = Some(enemy);
        self
    }

    /// Look up an actor in the context by ID.
    #[must_use]
    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        if self.player.id == id {
            return Some(&self.player);
        }
        self.enemy.as_ref().filter(|e| e.id == id)
    }

    /// Look up an actor in the context by ID, mutably.
    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        if self.player.id == id {
            return Some(&mut self.player);
        }
        self.enemy.as_mut().filter(|e| e.id == id)
    }

    /// Get a run state value with default.
    #[must_use]
    pub fn get_state(&self, key: &str, default: i64) -> i64 {
        self.run_state.get(key).copied().unwrap_or(default)
    }

    /// Set a run state value.
    pub fn set_state(&mut self, key: impl Into<String>, value: i64) {
        self.run_state.insert(key.into(), value);
    }

    /// Modify a run state value by delta.
    pub fn modify_state(&mut self, key: &str, delta: i64) {
        let current = self.get_state(key, 0);
        self.run_state.insert(key.to_string(), current + delta);
    }

    /// Advance to the next turn.
    pub fn next_turn(&mut self) {
        self.turn += 1;
    }
}
