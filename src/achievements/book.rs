//! Achievement definitions and progress tracking.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::{EngineError, HandlerError};
use crate::hooks::{HookBus, HookEvent, HookRegistration, SYNERGY_TRIGGERED};

/// Registration ID used by [`AchievementBook::attach`].
pub const ACHIEVEMENTS_HOOK_ID: &str = "achievements";

/// Deck size that starts counting towards `deck-master`.
const DECK_SIZE_FLOOR: u64 = 15;
/// Stat value that starts counting towards `stat-master`.
const STAT_FLOOR: u64 = 20;

/// Static achievement data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    /// Counter value that unlocks the achievement.
    pub threshold: u64,
}

impl AchievementDefinition {
    fn new(id: &str, name: &str, description: &str, icon: &str, threshold: u64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            threshold,
        }
    }
}

/// Progress towards one achievement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementProgress {
    pub counter: u64,
    pub unlocked: bool,
}

/// Announcement of a newly unlocked achievement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unlock {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
}

/// Gameplay events that feed achievements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum GameplayEvent {
    BurnDamage { amount: u64 },
    Synergy,
    RelicAcquired,
    FlawlessVictory,
    DeckSize { size: u64 },
    LegendaryCard,
    StatThreshold { value: u64 },
}

/// Tracks achievement progress for a profile.
///
/// ## Example
///
/// ```
/// use flavor_combat::achievements::{AchievementBook, GameplayEvent};
///
/// let mut book = AchievementBook::new();
/// let unlocked = book.check(GameplayEvent::BurnDamage { amount: 12 });
///
/// assert_eq!(unlocked[0].id, "first-burn");
/// assert_eq!(book.progress(), 14);
/// ```
#[derive(Clone, Debug)]
pub struct AchievementBook {
    definitions: Vec<AchievementDefinition>,
    progress: BTreeMap<String, AchievementProgress>,
}

impl Default for AchievementBook {
    fn default() -> Self {
        Self::new()
    }
}

impl AchievementBook {
    /// Create a book with the standard achievements and no progress.
    #[must_use]
    pub fn new() -> Self {
        let definitions = standard_achievements();
        let progress = definitions
            .iter()
            .map(|def| (def.id.clone(), AchievementProgress::default()))
            .collect();
        Self {
            definitions,
            progress,
        }
    }

    /// Add `amount` to an achievement's counter.
    ///
    /// Returns the unlock the first time the counter reaches the threshold.
    /// Unknown IDs are logged and ignored.
    pub fn increment(&mut self, id: &str, amount: u64) -> Option<Unlock> {
        let Some(def) = self.definitions.iter().find(|d| d.id == id) else {
            tracing::warn!(achievement = id, "unknown achievement");
            return None;
        };
        let entry = self.progress.entry(def.id.clone()).or_default();
        if entry.unlocked {
            return None;
        }

        entry.counter = entry.counter.saturating_add(amount);
        if entry.counter < def.threshold {
            return None;
        }
        entry.unlocked = true;
        tracing::info!(achievement = %def.id, name = %def.name, "achievement unlocked");

        Some(Unlock {
            id: def.id.clone(),
            name: def.name.clone(),
            description: def.description.clone(),
            icon: def.icon.clone(),
        })
    }

    /// Route a gameplay event to the achievement it counts towards.
    pub fn check(&mut self, event: GameplayEvent) -> Vec<Unlock> {
        let unlock = match event {
            GameplayEvent::BurnDamage { amount } => self.increment("first-burn", amount),
            GameplayEvent::Synergy => self.increment("synergy-master", 1),
            GameplayEvent::RelicAcquired => self.increment("relic-collector", 1),
            GameplayEvent::FlawlessVictory => self.increment("perfect-victory", 1),
            GameplayEvent::DeckSize { size } if size >= DECK_SIZE_FLOOR => {
                self.increment("deck-master", size)
            }
            GameplayEvent::StatThreshold { value } if value >= STAT_FLOOR => {
                self.increment("stat-master", value)
            }
            GameplayEvent::LegendaryCard => self.increment("legendary-pull", 1),
            GameplayEvent::DeckSize { .. } | GameplayEvent::StatThreshold { .. } => None,
        };
        unlock.into_iter().collect()
    }

    /// Every achievement with its progress, in definition order.
    pub fn all(&self) -> impl Iterator<Item = (&AchievementDefinition, AchievementProgress)> {
        self.definitions.iter().map(|def| {
            let progress = self.progress.get(&def.id).copied().unwrap_or_default();
            (def, progress)
        })
    }

    /// Unlocked achievements, in definition order.
    #[must_use]
    pub fn unlocked(&self) -> Vec<&AchievementDefinition> {
        self.all()
            .filter(|(_, progress)| progress.unlocked)
            .map(|(def, _)| def)
            .collect()
    }

    /// Percentage of achievements unlocked, rounded down.
    #[must_use]
    pub fn progress(&self) -> u32 {
        if self.definitions.is_empty() {
            return 0;
        }
        let unlocked = self.unlocked().len() as u32;
        unlocked * 100 / self.definitions.len() as u32
    }

    /// Drop all progress.
    pub fn reset(&mut self) {
        for entry in self.progress.values_mut() {
            *entry = AchievementProgress::default();
        }
    }

    /// Progress keyed by achievement ID, for saving.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, AchievementProgress> {
        self.progress.clone()
    }

    /// Load saved progress. Entries for unknown IDs are dropped.
    pub fn restore(&mut self, saved: BTreeMap<String, AchievementProgress>) {
        self.reset();
        for (id, progress) in saved {
            match self.progress.get_mut(&id) {
                Some(entry) => *entry = progress,
                None => tracing::warn!(achievement = %id, "dropping progress for unknown achievement"),
            }
        }
    }

    /// Register `book` on `bus` so every triggered synergy counts.
    pub fn attach(book: Rc<RefCell<Self>>, bus: &mut HookBus) -> Result<(), EngineError> {
        let registration = HookRegistration::new(ACHIEVEMENTS_HOOK_ID)
            .named("Achievements")
            .on(SYNERGY_TRIGGERED, move |event| {
                if let HookEvent::SynergyTriggered(fired) = event {
                    if !fired.took_effect() {
                        return Ok(());
                    }
                }
                let mut book = book
                    .try_borrow_mut()
                    .map_err(|_| HandlerError::new("achievement book is already borrowed"))?;
                book.check(GameplayEvent::Synergy);
                Ok(())
            });
        bus.register(registration)
    }
}

fn standard_achievements() -> Vec<AchievementDefinition> {
    vec![
        AchievementDefinition::new(
            "first-burn",
            "Feeling the Heat",
            "Deal 10 Burn damage in a single run",
            "🔥",
            10,
        ),
        AchievementDefinition::new(
            "synergy-master",
            "Flavor Fusion",
            "Trigger 5 synergies in a single run",
            "✨",
            5,
        ),
        AchievementDefinition::new("relic-collector", "Artifact Hunter", "Collect 3 relics", "🏺", 3),
        AchievementDefinition::new(
            "perfect-victory",
            "Flawless Chef",
            "Defeat an enemy without taking damage",
            "👨‍🍳",
            1,
        ),
        AchievementDefinition::new(
            "deck-master",
            "Culinary Architect",
            "Build a deck with 15+ cards",
            "🃏",
            15,
        ),
        AchievementDefinition::new("legendary-pull", "Golden Spoon", "Draw a legendary card", "⭐", 1),
        AchievementDefinition::new("stat-master", "Balanced Palate", "Reach 20+ in any stat", "📈", 20),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::{HookEvent, SynergyTriggered};

    #[test]
    fn test_unlock_once() {
        let mut book = AchievementBook::new();

        assert!(book.increment("relic-collector", 2).is_none());
        let unlock = book.increment("relic-collector", 1).unwrap();
        assert_eq!(unlock.name, "Artifact Hunter");
        assert!(book.increment("relic-collector", 1).is_none());
    }

    #[test]
    fn test_unknown_id() {
        let mut book = AchievementBook::new();
        assert!(book.increment("speedrun", 1).is_none());
        assert_eq!(book.all().count(), 7);
    }

    #[test]
    fn test_floors() {
        let mut book = AchievementBook::new();

        assert!(book.check(GameplayEvent::DeckSize { size: 14 }).is_empty());
        assert!(book.check(GameplayEvent::StatThreshold { value: 19 }).is_empty());
        assert_eq!(book.check(GameplayEvent::DeckSize { size: 15 }).len(), 1);
        assert_eq!(book.check(GameplayEvent::StatThreshold { value: 20 })[0].id, "stat-master");
    }

    #[test]
    fn test_progress_percent() {
        let mut book = AchievementBook::new();
        assert_eq!(book.progress(), 0);

        book.check(GameplayEvent::FlawlessVictory);
        book.check(GameplayEvent::LegendaryCard);
        assert_eq!(book.progress(), 28);
        assert_eq!(book.unlocked().len(), 2);
    }

    #[test]
    fn test_reset_and_restore() {
        let mut book = AchievementBook::new();
        book.check(GameplayEvent::BurnDamage { amount: 4 });
        book.check(GameplayEvent::FlawlessVictory);
        let saved = book.snapshot();

        book.reset();
        assert!(book.unlocked().is_empty());

        book.restore(saved);
        assert_eq!(book.unlocked()[0].id, "perfect-victory");
        let burn = book.all().find(|(def, _)| def.id == "first-burn").unwrap().1;
        assert_eq!(burn.counter, 4);
    }

    #[test]
    fn test_attach_counts_synergies() {
        let book = Rc::new(RefCell::new(AchievementBook::new()));
        let mut bus = HookBus::new();
        AchievementBook::attach(Rc::clone(&book), &mut bus).unwrap();

        let event = HookEvent::SynergyTriggered(SynergyTriggered {
            combo: "Sugar Rush".to_string(),
            tags: ["Sweet".to_string(), "Sweet".to_string()],
            result: "Synergy: Sugar Rush!".to_string(),
            applied: 1,
            skipped: Vec::new(),
        });
        for _ in 0..5 {
            assert!(bus.dispatch(&event).is_clean());
        }

        assert_eq!(book.borrow().unlocked()[0].id, "synergy-master");
        assert!(AchievementBook::attach(book, &mut bus).is_err());
    }

    #[test]
    fn test_attach_reports_busy_book() {
        let book = Rc::new(RefCell::new(AchievementBook::new()));
        let mut bus = HookBus::new();
        AchievementBook::attach(Rc::clone(&book), &mut bus).unwrap();

        let _held = book.borrow_mut();
        let report = bus.dispatch(&HookEvent::SynergyTriggered(SynergyTriggered {
            combo: "Deep Broth".to_string(),
            tags: ["Umami".to_string(), "Umami".to_string()],
            result: String::new(),
            applied: 1,
            skipped: Vec::new(),
        }));
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn test_attach_ignores_combos_without_effect() {
        let book = Rc::new(RefCell::new(AchievementBook::new()));
        let mut bus = HookBus::new();
        AchievementBook::attach(Rc::clone(&book), &mut bus).unwrap();

        let event = HookEvent::SynergyTriggered(SynergyTriggered {
            combo: "Sugar Rush".to_string(),
            tags: ["Sweet".to_string(), "Sweet".to_string()],
            result: "Synergy: Sugar Rush!".to_string(),
            applied: 0,
            skipped: vec!["player has no sweetness".to_string()],
        });
        for _ in 0..5 {
            bus.dispatch(&event);
        }

        let book = book.borrow();
        assert!(book.unlocked().is_empty());
        let synergy = book.all().find(|(def, _)| def.id == "synergy-master").unwrap().1;
        assert_eq!(synergy.counter, 0);
    }
}
