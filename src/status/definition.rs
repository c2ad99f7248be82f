//! Status definitions - static status data.
//!
//! A `StatusDefinition` describes a kind of status (Burn, Regen, ...):
//! its category, the phase it ticks in, the effect descriptors other systems
//! query through `StatusEngine::get_status_modifier`, and what a tick does
//! to the holder.
//!
//! Instance data (stacks, remaining duration) lives in `StatusInstance`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Actor, Capabilities, HandlerError, Stat};

/// Buff or debuff.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusCategory {
    Buff,
    Debuff,
}

/// When a status's tick fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TickPhase {
    /// At the start of the holder's turn.
    StartTurn,
    /// At the end of the holder's turn.
    EndTurn,
    /// Only when the host ticks the passive phase explicitly.
    Passive,
}

impl TickPhase {
    /// Wire name of the phase.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TickPhase::StartTurn => "startTurn",
            TickPhase::EndTurn => "endTurn",
            TickPhase::Passive => "passive",
        }
    }
}

impl std::fmt::Display for TickPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an effect descriptor contributes to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectKind {
    Damage,
    EnergyDrain,
    StatReduction,
    StatBoost,
    DamageReduction,
    Heal,
    /// Game-specific effect type.
    Custom(String),
}

/// Magnitude of an effect descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Amount {
    /// A fixed value.
    Literal(i64),
    /// The owning instance's current stacks.
    CurrentStacks,
    /// A percentage. Contributes to percent modifiers only.
    Percent(i64),
}

impl Amount {
    /// Flat contribution for an instance with `stacks` stacks.
    #[must_use]
    pub fn flat(self, stacks: u32) -> i64 {
        match self {
            Amount::Literal(value) => value,
            Amount::CurrentStacks => i64::from(stacks),
            Amount::Percent(_) => 0,
        }
    }

    /// Percent contribution.
    #[must_use]
    pub fn percent(self) -> i64 {
        match self {
            Amount::Percent(value) => value,
            Amount::Literal(_) | Amount::CurrentStacks => 0,
        }
    }
}

/// One effect of a status, queried by damage/stat calculations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectDescriptor {
    /// Effect type.
    #[serde(rename = "type")]
    pub kind: EffectKind,

    /// Magnitude.
    pub amount: Amount,

    /// Stats the effect applies to, if it is stat-specific.
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub stats: SmallVec<[Stat; 2]>,
}

impl EffectDescriptor {
    /// Create a descriptor.
    #[must_use]
    pub fn new(kind: EffectKind, amount: Amount) -> Self {
        Self {
            kind,
            amount,
            stats: SmallVec::new(),
        }
    }

    /// Restrict the descriptor to a stat (builder pattern).
    #[must_use]
    pub fn on_stat(mut self, stat: Stat) -> Self {
        self.stats.push(stat);
        self
    }
}

/// Built-in tick behavior.
///
/// Each rule declares the capabilities it needs and does nothing (no
/// message) on a holder that lacks them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum TickRule {
    /// `hp -= stacks`.
    DamageHolder,
    /// `energy -= amount`, floored at 0.
    DrainEnergy { amount: i64 },
    /// `+amount` to each listed stat the holder carries.
    BoostStats { stats: SmallVec<[Stat; 2]>, amount: i64 },
    /// `hp += stacks`, capped at `maxHp`.
    Heal,
    /// No mutation; reports the message with `{stacks}` substituted.
    Announce { message: String },
    /// Nothing at all.
    Silent,
}

impl TickRule {
    /// Capabilities the holder needs for this rule to act.
    #[must_use]
    pub fn requires(&self) -> Capabilities {
        match self {
            TickRule::DamageHolder => Capabilities::HP,
            TickRule::DrainEnergy { .. } => Capabilities::ENERGY,
            TickRule::Heal => Capabilities::VITALS,
            TickRule::BoostStats { .. } | TickRule::Announce { .. } | TickRule::Silent => {
                Capabilities::empty()
            }
        }
    }

    /// Apply the rule for status `status` with `stacks` stacks.
    pub fn apply(&self, status: &str, holder: &mut Actor, stacks: u32) -> Option<String> {
        if !holder.capabilities().contains(self.requires()) {
            return None;
        }
        let stacks_value = i64::from(stacks);

        match self {
            TickRule::DamageHolder => {
                holder.adjust(Stat::Hp, -stacks_value);
                Some(format!(
                    "{} suffers {} {} damage",
                    holder.display_name(),
                    stacks,
                    status
                ))
            }
            TickRule::DrainEnergy { amount } => {
                let energy = holder.stat(Stat::Energy).unwrap_or(0);
                holder.set_stat(Stat::Energy, (energy - amount).max(0));
                Some(format!("{status} drains {amount} energy"))
            }
            TickRule::BoostStats { stats, amount } => {
                for stat in stats {
                    holder.adjust(*stat, *amount);
                }
                Some(format!("{status} boosts stats"))
            }
            TickRule::Heal => {
                let hp = holder.stat(Stat::Hp).unwrap_or(0);
                let max_hp = holder.stat(Stat::MaxHp).unwrap_or(hp);
                let healed = stacks_value.min(max_hp - hp).max(0);
                holder.adjust(Stat::Hp, healed);
                Some(format!("{status} heals {healed} HP"))
            }
            TickRule::Announce { message } => {
                Some(message.replace("{stacks}", &stacks.to_string()))
            }
            TickRule::Silent => None,
        }
    }
}

/// A tick handler supplied in code rather than as a rule.
pub type TickFn = Arc<dyn Fn(&mut Actor, u32) -> Result<Option<String>, HandlerError> + Send + Sync>;

/// Static status definition.
///
/// ## Example
///
/// ```
/// use flavor_combat::status::{
///     Amount, EffectDescriptor, EffectKind, StatusCategory, StatusDefinition, TickPhase, TickRule,
/// };
///
/// let burn = StatusDefinition::new("Burn", StatusCategory::Debuff, TickPhase::EndTurn)
///     .with_effect(EffectDescriptor::new(EffectKind::Damage, Amount::CurrentStacks))
///     .with_tick(TickRule::DamageHolder);
///
/// assert_eq!(burn.tick_phase, TickPhase::EndTurn);
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDefinition {
    /// Unique name.
    pub name: String,

    /// Buff or debuff.
    pub category: StatusCategory,

    /// Phase in which the status ticks.
    pub tick_phase: TickPhase,

    /// Display icon.
    #[serde(default)]
    pub icon: String,

    /// Effect descriptors, in order.
    #[serde(default)]
    pub effects: Vec<EffectDescriptor>,

    /// Built-in tick behavior.
    #[serde(default = "default_tick")]
    pub tick: TickRule,

    /// Code-supplied tick handler. Takes precedence over `tick`.
    #[serde(skip)]
    handler: Option<TickFn>,
}

fn default_tick() -> TickRule {
    TickRule::Silent
}

impl StatusDefinition {
    /// Create a definition with no effects and a silent tick.
    #[must_use]
    pub fn new(name: impl Into<String>, category: StatusCategory, tick_phase: TickPhase) -> Self {
        Self {
            name: name.into(),
            category,
            tick_phase,
            icon: String::new(),
            effects: Vec::new(),
            tick: TickRule::Silent,
            handler: None,
        }
    }

    /// Set the icon (builder pattern).
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Add an effect descriptor (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: EffectDescriptor) -> Self {
        self.effects.push(effect);
        self
    }

    /// Set the built-in tick rule (builder pattern).
    #[must_use]
    pub fn with_tick(mut self, tick: TickRule) -> Self {
        self.tick = tick;
        self
    }

    /// Set a code-supplied tick handler (builder pattern).
    #[must_use]
    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut Actor, u32) -> Result<Option<String>, HandlerError> + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Run one tick against `holder`.
    pub fn run_tick(&self, holder: &mut Actor, stacks: u32) -> Result<Option<String>, HandlerError> {
        match &self.handler {
            Some(handler) => handler(holder, stacks),
            None => Ok(self.tick.apply(&self.name, holder, stacks)),
        }
    }
}

impl std::fmt::Debug for StatusDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusDefinition")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("tick_phase", &self.tick_phase)
            .field("icon", &self.icon)
            .field("effects", &self.effects)
            .field("tick", &self.tick)
            .field("custom_handler", &self.handler.is_some())
            .finish()
    }
}
