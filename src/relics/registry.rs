//! Relic registry.

use rustc_hash::FxHashMap;

use crate::core::{EngineError, Stat};
use crate::effects::Effect;
use crate::hooks::{CARD_PLAY, ENEMY_SPAWN, SYNERGY_TRIGGERED, TURN_END, TURN_START};

use super::definition::{Gate, RelicDefinition, RelicRarity, RelicReaction};

/// Run state key set by Tweezers of Precision at turn start.
pub const FIRST_CARD_DISCOUNT: &str = "firstCardDiscount";
/// Run state key raised by Scorch Fragment.
pub const BURN_BONUS: &str = "burnBonus";

/// Registry of relic definitions.
///
/// Iteration follows registration order.
#[derive(Clone, Debug, Default)]
pub struct RelicRegistry {
    relics: FxHashMap<String, RelicDefinition>,
    order: Vec<String>,
}

impl RelicRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The relics shipped with the game.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for relic in standard_relics() {
            registry
                .register(relic)
                .expect("standard relic ids are distinct");
        }
        registry
    }

    /// Load relics from a JSON array.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let relics: Vec<RelicDefinition> = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for relic in relics {
            registry.register(relic)?;
        }
        Ok(registry)
    }

    /// Register a relic.
    ///
    /// Fails with `InvalidConfig` if the ID is already taken.
    pub fn register(&mut self, relic: RelicDefinition) -> Result<(), EngineError> {
        if self.relics.contains_key(&relic.id) {
            return Err(EngineError::InvalidConfig(format!(
                "relic {} already registered",
                relic.id
            )));
        }
        self.order.push(relic.id.clone());
        self.relics.insert(relic.id.clone(), relic);
        Ok(())
    }

    /// Get a relic by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&RelicDefinition> {
        self.relics.get(id)
    }

    /// Check if an ID is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.relics.contains_key(id)
    }

    /// Get the number of registered relics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.relics.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.relics.is_empty()
    }

    /// Iterate over relics in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RelicDefinition> {
        self.order.iter().filter_map(|id| self.relics.get(id))
    }
}

fn standard_relics() -> Vec<RelicDefinition> {
    vec![
        RelicDefinition::new("tweezers-of-precision", "Tweezers of Precision", RelicRarity::Uncommon)
            .with_icon("🔧")
            .with_description("First card each turn costs 1 less energy")
            .with_reaction(
                RelicReaction::on(TURN_START).with_effect(Effect::set_state(FIRST_CARD_DISCOUNT, 1)),
            )
            .with_reaction(
                RelicReaction::on(CARD_PLAY)
                    .gated(Gate::ConsumeState {
                        key: FIRST_CARD_DISCOUNT.to_string(),
                    })
                    .with_message("Tweezers of Precision: -1 cost"),
            ),
        RelicDefinition::new("scorch-fragment", "Scorch Fragment", RelicRarity::Rare)
            .with_icon("🔥")
            .with_description("Every 4th turn, Burn ticks deal +1 damage")
            .with_reaction(
                RelicReaction::on(TURN_END)
                    .gated(Gate::EveryNth { n: 4 })
                    .with_effect(Effect::modify_state(BURN_BONUS, 1))
                    .with_message("Scorch Fragment: Burn intensity increased!"),
            ),
        RelicDefinition::new("umami-anchor", "Umami Anchor", RelicRarity::Common)
            .with_icon("⚓")
            .with_description("Start each combat with +3 Umami")
            .with_reaction(
                RelicReaction::on(ENEMY_SPAWN)
                    .with_effect(Effect::modify(Stat::Umami, 3))
                    .with_message("Umami Anchor: +3 starting Umami"),
            ),
        RelicDefinition::new("spice-lens", "Spice Lens", RelicRarity::Rare)
            .with_icon("🔍")
            .with_description("Spice-tagged cards deal double damage")
            .with_reaction(
                RelicReaction::on(CARD_PLAY)
                    .gated(Gate::CardTagged {
                        tag: "Spice".to_string(),
                    })
                    .with_message("Spice Lens: Enhanced spice effect!"),
            ),
        RelicDefinition::new("crystal-vial", "Crystal Vial", RelicRarity::Legendary)
            .with_icon("⚗️")
            .with_description("Gain 1 of each stat every 3 turns")
            .with_reaction(
                RelicReaction::on(TURN_END)
                    .gated(Gate::EveryNth { n: 3 })
                    .with_effect(Effect::modify_flavors(1))
                    .with_message("Crystal Vial: All stats increased!"),
            ),
        RelicDefinition::new("donkey-charm", "Donkey Charm", RelicRarity::Legendary)
            .with_icon("🎭")
            .with_description("Synergies trigger twice")
            .with_reaction(
                RelicReaction::on(SYNERGY_TRIGGERED).with_message("Donkey Charm: Synergy doubled!"),
            ),
    ]
}
