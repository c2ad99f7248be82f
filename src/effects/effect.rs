//! Effect definitions.
//!
//! Effects are the data every content source (combos, relics, run
//! modifiers) uses to describe what it does to the shared context. They are
//! plain data so content can be loaded from JSON and compared in tests.

use serde::{Deserialize, Serialize};

use crate::core::Stat;

/// An effect on the shared [`EffectContext`](crate::core::EffectContext).
///
/// ## Player Pool Effects
///
/// - `ModifyStat`: add to one of the player's pools, optionally floored
/// - `RestoreEnergy`: add energy, capped relative to base energy
/// - `RefillEnergy`: set energy to base energy
///
/// ## Run State Effects
///
/// - `ModifyState` / `SetState`: key-value run flags such as
///   `burnBonus` or `maxHand`
///
/// ## Enemy Effects
///
/// - `ApplyEnemyStatus`: apply a status to the current opponent
///
/// ## Composite
///
/// - `Batch`: resolve several effects in order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Effect {
    /// Add `delta` to a player pool, never going below `floor`.
    /// Skipped if the player lacks the pool.
    ModifyStat {
        stat: Stat,
        delta: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        floor: Option<i64>,
    },

    /// `energy = min(energy + amount, baseEnergy + headroom)`.
    /// Without `baseEnergy` the cap is not applied.
    RestoreEnergy { amount: i64, headroom: i64 },

    /// `energy = baseEnergy`. Skipped without `baseEnergy`.
    RefillEnergy,

    /// Apply a status to the enemy through the status engine.
    /// Skipped when no combat is in progress.
    ApplyEnemyStatus {
        status: String,
        stacks: u32,
        duration: u32,
    },

    /// Add `delta` to a run state value (absent keys read as 0).
    ModifyState {
        key: String,
        delta: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        floor: Option<i64>,
    },

    /// Overwrite a run state value.
    SetState { key: String, value: i64 },

    /// Resolve each effect in sequence.
    Batch { effects: Vec<Effect> },
}

impl Effect {
    /// Create a pool modification.
    #[must_use]
    pub fn modify(stat: Stat, delta: i64) -> Self {
        Self::ModifyStat {
            stat,
            delta,
            floor: None,
        }
    }

    /// Create the same modification on every flavor pool.
    #[must_use]
    pub fn modify_flavors(delta: i64) -> Self {
        Self::batch(Stat::FLAVORS.into_iter().map(|stat| Self::modify(stat, delta)))
    }

    /// Create an energy restore.
    #[must_use]
    pub fn restore_energy(amount: i64, headroom: i64) -> Self {
        Self::RestoreEnergy { amount, headroom }
    }

    /// Create an enemy status application.
    pub fn enemy_status(status: impl Into<String>, stacks: u32, duration: u32) -> Self {
        Self::ApplyEnemyStatus {
            status: status.into(),
            stacks,
            duration,
        }
    }

    /// Create a run state modification.
    pub fn modify_state(key: impl Into<String>, delta: i64) -> Self {
        Self::ModifyState {
            key: key.into(),
            delta,
            floor: None,
        }
    }

    /// Create a run state assignment.
    pub fn set_state(key: impl Into<String>, value: i64) -> Self {
        Self::SetState {
            key: key.into(),
            value,
        }
    }

    /// Create a batch.
    pub fn batch(effects: impl IntoIterator<Item = Effect>) -> Self {
        Self::Batch {
            effects: effects.into_iter().collect(),
        }
    }

    /// Floor a `ModifyStat` or `ModifyState` result (builder pattern).
    ///
    /// Other effects are returned unchanged.
    #[must_use]
    pub fn at_least(mut self, min: i64) -> Self {
        match &mut self {
            Self::ModifyStat { floor, .. } | Self::ModifyState { floor, .. } => {
                *floor = Some(min);
            }
            _ => {}
        }
        self
    }

    /// Number of leaf effects, i.e. the length of a resolution list.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Batch { effects } => effects.iter().map(Effect::leaf_count).sum(),
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_least_only_floors_modifications() {
        assert_eq!(
            Effect::modify(Stat::BaseEnergy, -1).at_least(1),
            Effect::ModifyStat {
                stat: Stat::BaseEnergy,
                delta: -1,
                floor: Some(1)
            }
        );
        assert_eq!(Effect::RefillEnergy.at_least(3), Effect::RefillEnergy);
    }

    #[test]
    fn test_leaf_count() {
        let effect = Effect::batch([
            Effect::modify_flavors(1),
            Effect::restore_energy(2, 3),
        ]);
        assert_eq!(effect.leaf_count(), 5);
        assert_eq!(Effect::batch([]).leaf_count(), 0);
    }

    #[test]
    fn test_json() {
        let json = r#"{ "type": "batch", "effects": [
            { "type": "modifyStat", "stat": "sweetness", "delta": 3 },
            { "type": "applyEnemyStatus", "status": "Burn", "stacks": 2, "duration": 2 },
            { "type": "modifyState", "key": "maxHand", "delta": -1, "floor": 1 },
            { "type": "refillEnergy" }
        ] }"#;
        let effect: Effect = serde_json::from_str(json).unwrap();
        assert_eq!(
            effect,
            Effect::batch([
                Effect::modify(Stat::Sweetness, 3),
                Effect::enemy_status("Burn", 2, 2),
                Effect::modify_state("maxHand", -1).at_least(1),
                Effect::RefillEnergy,
            ])
        );
    }
}
