//! Combo registry with order-insensitive lookup.

use rustc_hash::FxHashMap;

use crate::core::{EngineError, Stat};
use crate::effects::Effect;

use super::combo::{combo_key, ComboDefinition};

/// Registry of combo definitions.
///
/// A pair matches its own key first and the reversed key second, so a combo
/// registered as `Spice-Umami` also fires for `Umami`, `Spice`.
///
/// ## Example
///
/// ```
/// use flavor_combat::synergy::ComboRegistry;
///
/// let registry = ComboRegistry::standard();
/// let a = registry.lookup("Spice", "Umami").unwrap();
/// let b = registry.lookup("Umami", "Spice").unwrap();
/// assert_eq!(a.name, "Savory Heat");
/// assert_eq!(a.name, b.name);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ComboRegistry {
    combos: FxHashMap<String, ComboDefinition>,
    order: Vec<String>,
}

impl ComboRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The combos shipped with the game.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for combo in standard_combos() {
            registry
                .register(combo)
                .expect("standard combo keys are distinct in both orders");
        }
        registry
    }

    /// Load combos from a JSON array.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let combos: Vec<ComboDefinition> = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for combo in combos {
            registry.register(combo)?;
        }
        Ok(registry)
    }

    /// Register a combo.
    ///
    /// Fails with `InvalidConfig` if the key, or its reverse, is taken.
    pub fn register(&mut self, combo: ComboDefinition) -> Result<(), EngineError> {
        let key = combo.key();
        let reversed = combo_key(&combo.second, &combo.first);
        if self.combos.contains_key(&key) || self.combos.contains_key(&reversed) {
            return Err(EngineError::InvalidConfig(format!(
                "combo {key} already registered"
            )));
        }
        self.order.push(key.clone());
        self.combos.insert(key, combo);
        Ok(())
    }

    /// Get a combo by its exact key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ComboDefinition> {
        self.combos.get(key)
    }

    /// Find the combo for a tag pair in either order.
    #[must_use]
    pub fn lookup(&self, first: &str, second: &str) -> Option<&ComboDefinition> {
        self.combos
            .get(&combo_key(first, second))
            .or_else(|| self.combos.get(&combo_key(second, first)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.combos.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.combos.is_empty()
    }

    /// Iterate over combos in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ComboDefinition> {
        self.order.iter().filter_map(|key| self.combos.get(key))
    }
}

fn standard_combos() -> Vec<ComboDefinition> {
    vec![
        ComboDefinition::new(
            "Spice",
            "Umami",
            "Savory Heat",
            Effect::batch([
                Effect::modify(Stat::Spicecraft, 2),
                Effect::modify(Stat::Umami, 2),
            ]),
        )
        .with_description("Bonus +2 Spicecraft, +2 Umami")
        .with_message("Synergy: Savory Heat! +2 Spicecraft, +2 Umami"),
        ComboDefinition::new(
            "Spice",
            "Sweet",
            "Caramelized Fire",
            Effect::batch([
                Effect::modify(Stat::Sweetness, 3),
                Effect::enemy_status("Burn", 2, 2),
            ]),
        )
        .with_description("Bonus +3 Sweetness, apply Burn")
        .with_message("Synergy: Caramelized Fire! +3 Sweetness, enemy Burn x2"),
        ComboDefinition::new(
            "Umami",
            "Sweet",
            "Rich Harmony",
            Effect::batch([
                Effect::restore_energy(2, 3),
                Effect::modify(Stat::Spicecraft, 1),
                Effect::modify(Stat::Umami, 1),
                Effect::modify(Stat::Sweetness, 1),
                Effect::modify(Stat::Heat, 1),
            ]),
        )
        .with_description("Restore 2 energy, +1 to all stats")
        .with_message("Synergy: Rich Harmony! +2 Energy, +1 all stats"),
        ComboDefinition::new(
            "Spice",
            "Spice",
            "Double Heat",
            Effect::enemy_status("Burn", 3, 3),
        )
        .with_description("Massive burn damage")
        .with_message("Synergy: Double Heat! Enemy Burn x3"),
        ComboDefinition::new("Umami", "Umami", "Deep Broth", Effect::modify(Stat::Umami, 4))
            .with_description("Heal and boost Umami")
            .with_message("Synergy: Deep Broth! +4 Umami"),
        ComboDefinition::new(
            "Sweet",
            "Sweet",
            "Sugar Rush",
            Effect::modify(Stat::Sweetness, 3),
        )
        .with_description("Extra card draw")
        .with_message("Synergy: Sugar Rush! +3 Sweetness (draw bonus on next turn)"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_content() {
        let registry = ComboRegistry::standard();
        let keys: Vec<_> = registry.iter().map(ComboDefinition::key).collect();
        assert_eq!(
            keys,
            vec![
                "Spice-Umami",
                "Spice-Sweet",
                "Umami-Sweet",
                "Spice-Spice",
                "Umami-Umami",
                "Sweet-Sweet"
            ]
        );
    }

    #[test]
    fn test_standard_keeps_every_combo() {
        assert_eq!(ComboRegistry::standard().len(), standard_combos().len());
    }

    #[test]
    fn test_lookup_commutative() {
        let registry = ComboRegistry::standard();
        for combo in registry.iter() {
            let forward = registry.lookup(&combo.first, &combo.second).unwrap();
            let backward = registry.lookup(&combo.second, &combo.first).unwrap();
            assert_eq!(forward, backward);
        }
        assert!(registry.lookup("Spice", "Bitter").is_none());
    }

    #[test]
    fn test_reversed_duplicate_rejected() {
        let mut registry = ComboRegistry::standard();
        let combo = ComboDefinition::new("Umami", "Spice", "Clash", Effect::batch([]));
        assert!(matches!(
            registry.register(combo),
            Err(EngineError::InvalidConfig(_))
        ));
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn test_from_json() {
        let json = r#"[{
            "first": "Bitter", "second": "Sour", "name": "Pickle Punch",
            "description": "Sharp", "message": "Synergy: Pickle Punch!",
            "effect": { "type": "modifyStat", "stat": "heat", "delta": 2 }
        }]"#;
        let registry = ComboRegistry::from_json(json).unwrap();
        assert_eq!(registry.lookup("Sour", "Bitter").unwrap().name, "Pickle Punch");
    }
}
