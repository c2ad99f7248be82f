//! Status registry for definition lookup.
//!
//! The `StatusRegistry` stores every status definition for a game. It is
//! built once at startup and shared with engines behind an `Arc`.

use rustc_hash::FxHashMap;
use smallvec::smallvec;

use crate::core::{EngineError, Stat};

use super::definition::{
    Amount, EffectDescriptor, EffectKind, StatusCategory, StatusDefinition, TickPhase, TickRule,
};

/// Registry of status definitions.
///
/// Iteration follows registration order.
///
/// ## Example
///
/// ```
/// use flavor_combat::status::{StatusCategory, StatusDefinition, StatusRegistry, TickPhase};
///
/// let mut registry = StatusRegistry::new();
/// registry
///     .register(StatusDefinition::new("Chill", StatusCategory::Debuff, TickPhase::StartTurn))
///     .unwrap();
///
/// assert!(registry.contains("Chill"));
/// assert!(registry.get("Burn").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct StatusRegistry {
    definitions: FxHashMap<String, StatusDefinition>,
    order: Vec<String>,
}

impl StatusRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The statuses shipped with the game.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for def in standard_definitions() {
            registry
                .register(def)
                .expect("standard status names are distinct");
        }
        registry
    }

    /// Load definitions from a JSON array.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let definitions: Vec<StatusDefinition> = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for def in definitions {
            registry.register(def)?;
        }
        Ok(registry)
    }

    /// Register a definition.
    ///
    /// Fails with `InvalidConfig` if the name is already taken.
    pub fn register(&mut self, def: StatusDefinition) -> Result<(), EngineError> {
        if self.definitions.contains_key(&def.name) {
            return Err(EngineError::InvalidConfig(format!(
                "status {} already registered",
                def.name
            )));
        }
        self.order.push(def.name.clone());
        self.definitions.insert(def.name.clone(), def);
        Ok(())
    }

    /// Get a definition by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&StatusDefinition> {
        self.definitions.get(name)
    }

    /// Check if a name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Get the number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Iterate over definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &StatusDefinition> {
        self.order.iter().filter_map(|name| self.definitions.get(name))
    }

    /// Find definitions matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &StatusDefinition>
    where
        F: Fn(&StatusDefinition) -> bool,
    {
        self.iter().filter(move |d| predicate(d))
    }
}

fn standard_definitions() -> Vec<StatusDefinition> {
    vec![
        StatusDefinition::new("Burn", StatusCategory::Debuff, TickPhase::EndTurn)
            .with_icon("🔥")
            .with_effect(EffectDescriptor::new(EffectKind::Damage, Amount::CurrentStacks))
            .with_tick(TickRule::DamageHolder),
        StatusDefinition::new("Sap", StatusCategory::Debuff, TickPhase::StartTurn)
            .with_icon("🍯")
            .with_effect(EffectDescriptor::new(EffectKind::EnergyDrain, Amount::Literal(1)))
            .with_tick(TickRule::DrainEnergy { amount: 1 }),
        StatusDefinition::new("Blandness", StatusCategory::Debuff, TickPhase::Passive)
            .with_icon("🌫️")
            .with_effect(
                EffectDescriptor::new(EffectKind::StatReduction, Amount::CurrentStacks)
                    .on_stat(Stat::Spicecraft),
            )
            .with_tick(TickRule::Announce {
                message: "Blandness reduces effectiveness".to_string(),
            }),
        StatusDefinition::new("Fortify", StatusCategory::Buff, TickPhase::Passive)
            .with_icon("🛡️")
            .with_effect(EffectDescriptor::new(EffectKind::DamageReduction, Amount::CurrentStacks))
            .with_tick(TickRule::Announce {
                message: "Fortify provides {stacks} damage reduction".to_string(),
            }),
        StatusDefinition::new("Vigor", StatusCategory::Buff, TickPhase::StartTurn)
            .with_icon("💪")
            .with_effect(
                EffectDescriptor::new(EffectKind::StatBoost, Amount::Literal(1))
                    .on_stat(Stat::Spicecraft)
                    .on_stat(Stat::Umami),
            )
            .with_tick(TickRule::BoostStats {
                stats: smallvec![Stat::Spicecraft, Stat::Umami],
                amount: 1,
            }),
        StatusDefinition::new("Regen", StatusCategory::Buff, TickPhase::EndTurn)
            .with_icon("💚")
            .with_effect(EffectDescriptor::new(EffectKind::Heal, Amount::CurrentStacks))
            .with_tick(TickRule::Heal),
        StatusDefinition::new("Stick", StatusCategory::Debuff, TickPhase::Passive)
            .with_icon("🍬")
            .with_effect(EffectDescriptor::new(EffectKind::DamageReduction, Amount::Percent(25)))
            .with_tick(TickRule::Announce {
                message: "Stick reduces attack power by 25%".to_string(),
            }),
    ]
}
