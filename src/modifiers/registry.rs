//! Run modifier registry.

use rustc_hash::FxHashMap;

use crate::core::{EngineError, Stat};
use crate::effects::Effect;
use crate::hooks::ENEMY_ACTION;

use super::definition::{Difficulty, ModifierDefinition, ModifierReaction};

/// Run state key: extra chance, in percent, that Burn applications land.
pub const BURN_CHANCE: &str = "burnChance";
/// Run state key: multiplier on Burn damage taken.
pub const BURN_MULTIPLIER: &str = "burnMultiplier";
/// Run state key: hand size limit. Hosts seed it before adding modifiers.
pub const MAX_HAND: &str = "maxHand";

/// Registry of run modifier definitions.
///
/// Iteration follows registration order.
#[derive(Clone, Debug, Default)]
pub struct ModifierRegistry {
    modifiers: FxHashMap<String, ModifierDefinition>,
    order: Vec<String>,
}

impl ModifierRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The modifiers shipped with the game.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for modifier in standard_modifiers() {
            registry
                .register(modifier)
                .expect("standard modifier ids are distinct");
        }
        registry
    }

    /// Load modifiers from a JSON array.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let modifiers: Vec<ModifierDefinition> = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for modifier in modifiers {
            registry.register(modifier)?;
        }
        Ok(registry)
    }

    /// Register a modifier.
    ///
    /// Fails with `InvalidConfig` if the ID is already taken.
    pub fn register(&mut self, modifier: ModifierDefinition) -> Result<(), EngineError> {
        if self.modifiers.contains_key(&modifier.id) {
            return Err(EngineError::InvalidConfig(format!(
                "modifier {} already registered",
                modifier.id
            )));
        }
        self.order.push(modifier.id.clone());
        self.modifiers.insert(modifier.id.clone(), modifier);
        Ok(())
    }

    /// Get a modifier by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ModifierDefinition> {
        self.modifiers.get(id)
    }

    /// Check if an ID is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.modifiers.contains_key(id)
    }

    /// Get the number of registered modifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }

    /// Iterate over modifiers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ModifierDefinition> {
        self.order.iter().filter_map(|id| self.modifiers.get(id))
    }
}

fn standard_modifiers() -> Vec<ModifierDefinition> {
    vec![
        ModifierDefinition::new(
            "high-heat",
            "High Heat",
            Difficulty::Hard,
            Effect::batch([
                Effect::modify(Stat::BaseEnergy, -1).at_least(1),
                Effect::RefillEnergy,
                Effect::modify_state(BURN_CHANCE, 30),
            ]),
        )
        .with_icon("🔥")
        .with_description("-1 base energy, but Burn application chance increases")
        .with_message("High Heat active: -1 energy, +30% burn chance"),
        ModifierDefinition::new(
            "sweet-expand",
            "Sweet Expansion",
            Difficulty::Medium,
            Effect::batch([
                Effect::modify_state(MAX_HAND, 1),
                Effect::modify(Stat::Sweetness, -2),
            ]),
        )
        .with_icon("🍬")
        .with_description("+1 hand size, -2 starting Sweetness")
        .with_message("Sweet Expansion active: +1 hand size, -2 Sweetness"),
        ModifierDefinition::new(
            "umami-regen",
            "Umami Regeneration",
            Difficulty::Easy,
            Effect::modify_state("umamiPerEnemyAction", 1),
        )
        .with_icon("🍜")
        .with_description("+1 Umami per enemy action")
        .with_message("Umami Regen active: +1 Umami per enemy action")
        .with_reaction(ModifierReaction::new(
            ENEMY_ACTION,
            Effect::modify(Stat::Umami, 1),
            "+1 Umami (Umami Regeneration)",
        )),
        ModifierDefinition::new(
            "fragile-power",
            "Fragile Power",
            Difficulty::Hard,
            Effect::batch([Effect::modify_flavors(5), Effect::set_state(BURN_MULTIPLIER, 2)]),
        )
        .with_icon("💎")
        .with_description("+5 to all starting stats, but take double Burn damage")
        .with_message("Fragile Power active: +5 all stats, 2x Burn damage"),
        ModifierDefinition::new(
            "energy-surge",
            "Energy Surge",
            Difficulty::Medium,
            Effect::batch([
                Effect::modify(Stat::BaseEnergy, 1),
                Effect::RefillEnergy,
                Effect::modify_state(MAX_HAND, -1).at_least(1),
            ]),
        )
        .with_icon("⚡")
        .with_description("+1 base energy, but hand size -1")
        .with_message("Energy Surge active: +1 energy, -1 hand size"),
        ModifierDefinition::new(
            "spice-mastery",
            "Spice Mastery",
            Difficulty::Medium,
            Effect::batch([
                Effect::set_state("spiceDiscount", 1),
                Effect::set_state("otherCostIncrease", 1),
            ]),
        )
        .with_icon("🌶️")
        .with_description("Spice-tagged cards cost 1 less, others cost 1 more")
        .with_message("Spice Mastery active: Spice cards cheaper, others more expensive"),
    ]
}
