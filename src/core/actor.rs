//! Actors: the mutable records statuses are attached to.
//!
//! An `Actor` is either a combatant (player, enemy) or a run-state record.
//! Its numeric fields are optional: an enemy has `hp` but no flavor pools,
//! a run record may carry flavor pools but no `hp`. Which pools exist is
//! described explicitly by [`Capabilities`], and engine code branches on
//! that descriptor rather than probing fields one at a time.
//!
//! ## Usage
//!
//! ```
//! use flavor_combat::core::{Actor, ActorId, Capabilities, Stat};
//!
//! let slime = Actor::combatant(ActorId::new(1), "Slime", 20);
//! assert!(slime.capabilities().contains(Capabilities::VITALS));
//! assert_eq!(slime.stat(Stat::Hp), Some(20));
//! assert_eq!(slime.stat(Stat::Umami), None);
//! ```

use bitflags::bitflags;
use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::status::StatusInstance;

/// Unique identifier for an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u32);

impl ActorId {
    /// Create a new actor ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Actor({})", self.0)
    }
}

/// A numeric field an actor may carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stat {
    Hp,
    MaxHp,
    Energy,
    BaseEnergy,
    Spicecraft,
    Umami,
    Sweetness,
    Heat,
}

impl Stat {
    /// Every stat, in declaration order.
    pub const ALL: [Stat; 8] = [
        Stat::Hp,
        Stat::MaxHp,
        Stat::Energy,
        Stat::BaseEnergy,
        Stat::Spicecraft,
        Stat::Umami,
        Stat::Sweetness,
        Stat::Heat,
    ];

    /// The four flavor pools.
    pub const FLAVORS: [Stat; 4] = [Stat::Spicecraft, Stat::Umami, Stat::Sweetness, Stat::Heat];

    /// The capability bit that marks this stat as present.
    #[must_use]
    pub const fn capability(self) -> Capabilities {
        match self {
            Stat::Hp => Capabilities::HP,
            Stat::MaxHp => Capabilities::MAX_HP,
            Stat::Energy => Capabilities::ENERGY,
            Stat::BaseEnergy => Capabilities::BASE_ENERGY,
            Stat::Spicecraft => Capabilities::SPICECRAFT,
            Stat::Umami => Capabilities::UMAMI,
            Stat::Sweetness => Capabilities::SWEETNESS,
            Stat::Heat => Capabilities::HEAT,
        }
    }

    /// Wire name of the stat.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Stat::Hp => "hp",
            Stat::MaxHp => "maxHp",
            Stat::Energy => "energy",
            Stat::BaseEnergy => "baseEnergy",
            Stat::Spicecraft => "spicecraft",
            Stat::Umami => "umami",
            Stat::Sweetness => "sweetness",
            Stat::Heat => "heat",
        }
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Which stats an actor carries.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Capabilities: u16 {
        const HP = 1;
        const MAX_HP = 1 << 1;
        const ENERGY = 1 << 2;
        const BASE_ENERGY = 1 << 3;
        const SPICECRAFT = 1 << 4;
        const UMAMI = 1 << 5;
        const SWEETNESS = 1 << 6;
        const HEAT = 1 << 7;

        /// Current and maximum hit points.
        const VITALS = Self::HP.bits() | Self::MAX_HP.bits();
        /// All four flavor pools.
        const FLAVORS = Self::SPICECRAFT.bits()
            | Self::UMAMI.bits()
            | Self::SWEETNESS.bits()
            | Self::HEAT.bits();
    }
}

/// A mutable combatant or run-state record.
///
/// Statuses are kept in an `im::Vector` so a tick pass can take an O(1)
/// snapshot of the collection at phase entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Unique identifier.
    pub id: ActorId,

    /// Display name used in effect messages.
    pub name: Option<String>,

    /// Present stats only. Absent keys mean the actor lacks that field.
    #[serde(default)]
    stats: FxHashMap<Stat, i64>,

    /// Active statuses in insertion order. At most one per name.
    #[serde(default)]
    pub(crate) statuses: Vector<StatusInstance>,
}

impl Actor {
    /// Create an actor with no stats and no name.
    #[must_use]
    pub fn new(id: ActorId) -> Self {
        Self {
            id,
            name: None,
            stats: FxHashMap::default(),
            statuses: Vector::new(),
        }
    }

    /// Create a named combatant at full health.
    #[must_use]
    pub fn combatant(id: ActorId, name: impl Into<String>, max_hp: i64) -> Self {
        Self::new(id)
            .with_name(name)
            .with_stat(Stat::Hp, max_hp)
            .with_stat(Stat::MaxHp, max_hp)
    }

    /// Set the display name (builder pattern).
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a stat (builder pattern).
    #[must_use]
    pub fn with_stat(mut self, stat: Stat, value: i64) -> Self {
        self.stats.insert(stat, value);
        self
    }

    /// Name used in messages, `"Target"` when unnamed.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Target")
    }

    /// The capability descriptor derived from the stats present.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.stats
            .keys()
            .fold(Capabilities::empty(), |caps, stat| caps | stat.capability())
    }

    /// Check whether the actor carries a stat.
    #[must_use]
    pub fn has(&self, stat: Stat) -> bool {
        self.stats.contains_key(&stat)
    }

    /// Get a stat value, `None` if absent.
    #[must_use]
    pub fn stat(&self, stat: Stat) -> Option<i64> {
        self.stats.get(&stat).copied()
    }

    /// Set a stat, adding it if absent.
    pub fn set_stat(&mut self, stat: Stat, value: i64) {
        self.stats.insert(stat, value);
    }

    /// Remove a stat entirely.
    pub fn remove_stat(&mut self, stat: Stat) -> Option<i64> {
        self.stats.remove(&stat)
    }

    /// Add `delta` to a stat that is present.
    ///
    /// Returns `false` (and changes nothing) when the stat is absent.
    pub fn adjust(&mut self, stat: Stat, delta: i64) -> bool {
        match self.stats.get_mut(&stat) {
            Some(value) => {
                *value += delta;
                true
            }
            None => false,
        }
    }

    /// Active statuses in insertion order.
    #[must_use]
    pub fn statuses(&self) -> &Vector<StatusInstance> {
        &self.statuses
    }

    /// Look up an active status by name.
    #[must_use]
    pub fn status(&self, name: &str) -> Option<&StatusInstance> {
        self.statuses.iter().find(|s| s.name == name)
    }

    pub(crate) fn status_mut(&mut self, name: &str) -> Option<&mut StatusInstance> {
        self.statuses.iter_mut().find(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_id() {
        let id = ActorId::new(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(format!("{}", id), "Actor(7)");
    }

    #[test]
    fn test_combatant_has_vitals() {
        let actor = Actor::combatant(ActorId::new(1), "Slime", 30);

        assert_eq!(actor.display_name(), "Slime");
        assert_eq!(actor.stat(Stat::Hp), Some(30));
        assert_eq!(actor.stat(Stat::MaxHp), Some(30));
        assert_eq!(actor.capabilities(), Capabilities::VITALS);
    }

    #[test]
    fn test_unnamed_actor_display_name() {
        let actor = Actor::new(ActorId::new(2));
        assert_eq!(actor.display_name(), "Target");
        assert!(actor.capabilities().is_empty());
    }

    #[test]
    fn test_adjust_absent_stat_is_noop() {
        let mut actor = Actor::new(ActorId::new(1)).with_stat(Stat::Umami, 3);

        assert!(actor.adjust(Stat::Umami, 2));
        assert!(!actor.adjust(Stat::Heat, 2));
        assert_eq!(actor.stat(Stat::Umami), Some(5));
        assert!(!actor.has(Stat::Heat));
    }

    #[test]
    fn test_capabilities_track_stats() {
        let mut actor = Actor::new(ActorId::new(1));
        for stat in Stat::FLAVORS {
            actor.set_stat(stat, 0);
        }
        assert_eq!(actor.capabilities(), Capabilities::FLAVORS);

        actor.remove_stat(Stat::Heat);
        assert!(!actor.capabilities().contains(Capabilities::HEAT));
        assert!(actor.capabilities().contains(Capabilities::UMAMI));
    }

    #[test]
    fn test_stat_names() {
        assert_eq!(Stat::MaxHp.as_str(), "maxHp");
        let json = serde_json::to_string(&Stat::BaseEnergy).unwrap();
        assert_eq!(json, "\"baseEnergy\"");
    }

    #[test]
    fn test_actor_serialization() {
        let actor = Actor::combatant(ActorId::new(3), "Chef", 40).with_stat(Stat::Energy, 3);
        let json = serde_json::to_string(&actor).unwrap();
        let restored: Actor = serde_json::from_str(&json).unwrap();
        assert_eq!(actor, restored);
    }
}
