//! Synergy detector - matches recently played tags against combos.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{EffectContext, EngineConfig};
use crate::effects::{EffectResolver, Resolution};
use crate::hooks::{HookBus, HookEvent, SynergyTriggered};
use crate::status::StatusEngine;

use super::registry::ComboRegistry;
use super::window::SynergyWindow;

/// One row of the combo listing shown to players.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynergyListing {
    /// The combo key, e.g. `"Spice-Umami"`.
    pub tags: String,
    pub name: String,
    pub description: String,
}

/// Tracks played tags for a run and fires combos.
///
/// After every play only the two most recently pushed tags are tested, and
/// at most one combo fires. A firing combo clears the window.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use flavor_combat::core::{Actor, ActorId, EffectContext, Stat};
/// use flavor_combat::hooks::HookBus;
/// use flavor_combat::status::{StatusEngine, StatusRegistry};
/// use flavor_combat::synergy::{ComboRegistry, SynergyDetector};
///
/// let engine = StatusEngine::new(Arc::new(StatusRegistry::standard()));
/// let mut detector = SynergyDetector::new(Arc::new(ComboRegistry::standard()), engine);
/// let mut bus = HookBus::new();
/// let player = Actor::new(ActorId::new(0)).with_stat(Stat::Umami, 0);
/// let mut ctx = EffectContext::new(player);
///
/// assert_eq!(detector.record_play(&["Umami"], &mut ctx, &mut bus), None);
/// let message = detector.record_play(&["Umami"], &mut ctx, &mut bus);
/// assert_eq!(message.as_deref(), Some("Synergy: Deep Broth! +4 Umami"));
/// assert_eq!(ctx.player.stat(Stat::Umami), Some(4));
/// ```
#[derive(Clone, Debug)]
pub struct SynergyDetector {
    combos: Arc<ComboRegistry>,
    statuses: StatusEngine,
    window: SynergyWindow,
    last_fired: Option<SynergyTriggered>,
}

impl SynergyDetector {
    /// Create a detector with the default window.
    #[must_use]
    pub fn new(combos: Arc<ComboRegistry>, statuses: StatusEngine) -> Self {
        Self::with_config(combos, statuses, &EngineConfig::default())
    }

    /// Create a detector sized from `config`.
    #[must_use]
    pub fn with_config(
        combos: Arc<ComboRegistry>,
        statuses: StatusEngine,
        config: &EngineConfig,
    ) -> Self {
        Self {
            combos,
            statuses,
            window: SynergyWindow::new(config.synergy_window),
            last_fired: None,
        }
    }

    /// The current window.
    #[must_use]
    pub fn window(&self) -> &SynergyWindow {
        &self.window
    }

    /// Payload of the most recent combo, for relaying to reactors that are
    /// not on the bus.
    #[must_use]
    pub fn last_fired(&self) -> Option<&SynergyTriggered> {
        self.last_fired.as_ref()
    }

    /// The injected combo registry.
    #[must_use]
    pub fn combos(&self) -> &ComboRegistry {
        &self.combos
    }

    /// Record the tags of a played card and fire a combo if the last two
    /// tags form one.
    ///
    /// Returns the combo message when one fires. A play with no tags
    /// changes nothing. How many of the combo's effects applied, and why the
    /// rest were skipped, travels on the `synergyTriggered` event.
    pub fn record_play<S: AsRef<str>>(
        &mut self,
        tags: &[S],
        ctx: &mut EffectContext,
        bus: &mut HookBus,
    ) -> Option<String> {
        if tags.is_empty() {
            return None;
        }
        for tag in tags {
            self.window.push(tag.as_ref());
        }

        let (first, second) = self.window.last_pair()?;
        let combo = self.combos.lookup(first, second)?;
        let pair = [first.to_string(), second.to_string()];

        let resolutions = EffectResolver::resolve(ctx, &combo.effect, &self.statuses, bus);
        let applied = resolutions.iter().filter(|r| r.is_applied()).count();
        let skipped: Vec<String> = resolutions
            .iter()
            .filter_map(Resolution::skip_reason)
            .map(str::to_string)
            .collect();
        tracing::debug!(
            combo = %combo.name,
            first = %pair[0],
            second = %pair[1],
            applied,
            skipped = skipped.len(),
            "synergy triggered"
        );

        let fired = SynergyTriggered {
            combo: combo.name.clone(),
            tags: pair,
            result: combo.message.clone(),
            applied,
            skipped,
        };
        bus.dispatch(&HookEvent::SynergyTriggered(fired.clone()));

        let message = combo.message.clone();
        self.last_fired = Some(fired);
        self.window.clear();
        Some(message)
    }

    /// Every registered combo, for display.
    #[must_use]
    pub fn get_available_synergies(&self) -> Vec<SynergyListing> {
        self.combos
            .iter()
            .map(|combo| SynergyListing {
                tags: combo.key(),
                name: combo.name.clone(),
                description: combo.description.clone(),
            })
            .collect()
    }

    /// Clear the window (run reset).
    pub fn reset(&mut self) {
        self.window.clear();
        self.last_fired = None;
    }

    /// The buffered tags, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.window.tags().to_vec()
    }

    /// Restore buffered tags. Only the newest tags that fit are kept.
    pub fn restore<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.window.restore(tags);
    }
}
