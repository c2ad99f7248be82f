//! Effect resolution - executing effects on the shared context.
//!
//! The `EffectResolver` applies [`Effect`] data to an [`EffectContext`].
//! Enemy statuses go through the [`StatusEngine`] so `statusApplied`
//! reaches the hook bus like any other application.

use crate::core::{Capabilities, EffectContext, Stat};
use crate::hooks::HookBus;
use crate::status::StatusEngine;

use super::Effect;

/// Outcome of resolving one leaf effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The effect changed the context.
    Applied,
    /// The context could not take the effect.
    Skipped(String),
}

impl Resolution {
    /// Check whether the effect changed the context.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Resolution::Applied)
    }

    /// Why the effect was skipped, if it was.
    #[must_use]
    pub fn skip_reason(&self) -> Option<&str> {
        match self {
            Resolution::Applied => None,
            Resolution::Skipped(reason) => Some(reason),
        }
    }
}

/// Resolves effects against an [`EffectContext`].
pub struct EffectResolver;

impl EffectResolver {
    /// Resolve an effect, returning one result per leaf effect in order.
    pub fn resolve(
        ctx: &mut EffectContext,
        effect: &Effect,
        statuses: &StatusEngine,
        bus: &mut HookBus,
    ) -> Vec<Resolution> {
        let mut results = Vec::with_capacity(effect.leaf_count());
        Self::resolve_into(ctx, effect, statuses, bus, &mut results);
        results
    }

    fn resolve_into(
        ctx: &mut EffectContext,
        effect: &Effect,
        statuses: &StatusEngine,
        bus: &mut HookBus,
        results: &mut Vec<Resolution>,
    ) {
        if let Effect::Batch { effects } = effect {
            for effect in effects {
                Self::resolve_into(ctx, effect, statuses, bus, results);
            }
            return;
        }

        let result = Self::resolve_single(ctx, effect, statuses, bus);
        if let Resolution::Skipped(reason) = &result {
            tracing::debug!(%reason, "effect skipped");
        }
        results.push(result);
    }

    /// Resolve a single non-batch effect.
    pub fn resolve_single(
        ctx: &mut EffectContext,
        effect: &Effect,
        statuses: &StatusEngine,
        bus: &mut HookBus,
    ) -> Resolution {
        match effect {
            Effect::ModifyStat { stat, delta, floor } => match ctx.player.stat(*stat) {
                Some(current) => {
                    let value = current + delta;
                    ctx.player
                        .set_stat(*stat, floor.map_or(value, |min| value.max(min)));
                    Resolution::Applied
                }
                None => Resolution::Skipped(format!("player has no {stat}")),
            },

            Effect::RestoreEnergy { amount, headroom } => {
                let caps = ctx.player.capabilities();
                match ctx.player.stat(Stat::Energy) {
                    Some(energy) => {
                        let restored = energy + amount;
                        let value = if caps.contains(Capabilities::BASE_ENERGY) {
                            let base = ctx.player.stat(Stat::BaseEnergy).unwrap_or(0);
                            restored.min(base + headroom)
                        } else {
                            restored
                        };
                        ctx.player.set_stat(Stat::Energy, value);
                        Resolution::Applied
                    }
                    None => Resolution::Skipped("player has no energy".to_string()),
                }
            }

            Effect::RefillEnergy => match ctx.player.stat(Stat::BaseEnergy) {
                Some(base) => {
                    ctx.player.set_stat(Stat::Energy, base);
                    Resolution::Applied
                }
                None => Resolution::Skipped("player has no baseEnergy".to_string()),
            },

            Effect::ApplyEnemyStatus {
                status,
                stacks,
                duration,
            } => match ctx.enemy.as_mut() {
                Some(enemy) => match statuses.apply_status(bus, enemy, status, *stacks, *duration) {
                    Ok(_) => Resolution::Applied,
                    Err(err) => Resolution::Skipped(err.to_string()),
                },
                None => Resolution::Skipped("no enemy in combat".to_string()),
            },

            Effect::ModifyState { key, delta, floor } => {
                let value = ctx.get_state(key, 0) + delta;
                ctx.set_state(key.clone(), floor.map_or(value, |min| value.max(min)));
                Resolution::Applied
            }

            Effect::SetState { key, value } => {
                ctx.set_state(key.clone(), *value);
                Resolution::Applied
            }

            Effect::Batch { .. } => {
                let mut results = Vec::new();
                Self::resolve_into(ctx, effect, statuses, bus, &mut results);
                if results.iter().any(Resolution::is_applied) || results.is_empty() {
                    Resolution::Applied
                } else {
                    Resolution::Skipped("every batched effect was skipped".to_string())
                }
            }
        }
    }
}
