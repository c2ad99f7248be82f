//! Relic and run modifier integration tests.
//!
//! The host relays each event to the bus, the held relics and the active
//! modifiers, in that order, over one shared context.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use flavor_combat::achievements::AchievementBook;
use flavor_combat::core::{Actor, ActorId, EffectContext, Stat};
use flavor_combat::hooks::{HookBus, HookEvent, ENEMY_ACTION};
use flavor_combat::modifiers::{ModifierRegistry, ModifierSet, MAX_HAND};
use flavor_combat::relics::{RelicRegistry, RelicSet, BURN_BONUS};
use flavor_combat::status::{StatusEngine, StatusRegistry, TickPhase};
use flavor_combat::synergy::{ComboRegistry, SynergyDetector};

struct Host {
    engine: StatusEngine,
    detector: SynergyDetector,
    relics: RelicSet,
    modifiers: ModifierSet,
    bus: HookBus,
    ctx: EffectContext,
}

impl Host {
    fn new(player: Actor) -> Self {
        let engine = StatusEngine::new(Arc::new(StatusRegistry::standard()));
        let mut ctx = EffectContext::new(player);
        ctx.set_state(MAX_HAND, 5);
        Self {
            detector: SynergyDetector::new(Arc::new(ComboRegistry::standard()), engine.clone()),
            relics: RelicSet::new(Arc::new(RelicRegistry::standard()), engine.clone()),
            modifiers: ModifierSet::new(Arc::new(ModifierRegistry::standard()), engine.clone()),
            engine,
            bus: HookBus::new(),
            ctx,
        }
    }

    fn relay(&mut self, event: HookEvent) -> Vec<String> {
        self.bus.dispatch(&event);
        let mut messages = self.relics.trigger(&event, &mut self.ctx, &mut self.bus);
        messages.extend(self.modifiers.apply_hook(&event, &mut self.ctx, &mut self.bus));
        messages
    }

    fn play(&mut self, card: &str, tags: &[&str]) -> Vec<String> {
        let mut messages = self.relay(HookEvent::card_play(card, tags.iter().copied()));
        if let Some(message) = self.detector.record_play(tags, &mut self.ctx, &mut self.bus) {
            messages.push(message);
            if let Some(fired) = self.detector.last_fired().cloned() {
                messages.extend(self.relay(HookEvent::SynergyTriggered(fired)));
            }
        }
        messages
    }
}

fn chef() -> Actor {
    let mut player = Actor::combatant(ActorId::new(0), "Chef", 30)
        .with_stat(Stat::Energy, 3)
        .with_stat(Stat::BaseEnergy, 3);
    for stat in Stat::FLAVORS {
        player.set_stat(stat, 0);
    }
    player
}

/// A combat start, a few card plays and turn ends with relics and
/// modifiers active.
#[test]
fn test_combat_with_relics_and_modifiers() {
    let mut host = Host::new(chef());
    for relic in ["umami-anchor", "tweezers-of-precision", "donkey-charm", "scorch-fragment"] {
        host.relics.add(relic).unwrap();
    }
    let activation = host.modifiers.add("umami-regen", &mut host.ctx, &mut host.bus).unwrap();
    assert_eq!(activation.message, "Umami Regen active: +1 Umami per enemy action");

    host.ctx.enemy = Some(Actor::combatant(ActorId::new(1), "Gremlin", 40));
    let spawn = host.relay(HookEvent::EnemySpawn { enemy: "Gremlin".into() });
    assert_eq!(spawn, vec!["Umami Anchor: +3 starting Umami".to_string()]);

    host.relay(HookEvent::TurnStart { turn: 1 });
    let first = host.play("Miso Soup", &["Umami"]);
    assert_eq!(first, vec!["Tweezers of Precision: -1 cost".to_string()]);

    let second = host.play("Broth", &["Umami"]);
    assert_eq!(
        second,
        vec![
            "Synergy: Deep Broth! +4 Umami".to_string(),
            "Donkey Charm: Synergy doubled!".to_string(),
        ]
    );

    let action = host.relay(HookEvent::custom(ENEMY_ACTION, serde_json::Value::Null));
    assert_eq!(action, vec!["+1 Umami (Umami Regeneration)".to_string()]);
    assert_eq!(host.ctx.player.stat(Stat::Umami), Some(8));

    for turn in 1..=4 {
        host.relay(HookEvent::TurnEnd { turn });
    }
    assert_eq!(host.ctx.get_state(BURN_BONUS, 0), 1);
}

/// Relic effects that inflict statuses go through the status engine and
/// tick like any other application.
#[test]
fn test_combo_burn_ticks_after_relay() {
    let mut host = Host::new(chef());
    host.ctx.enemy = Some(Actor::combatant(ActorId::new(1), "Gremlin", 40));
    host.relics.add("spice-lens").unwrap();

    let messages = host.play("Chili", &["Spice", "Spice"]);
    assert_eq!(
        messages,
        vec![
            "Spice Lens: Enhanced spice effect!".to_string(),
            "Synergy: Double Heat! Enemy Burn x3".to_string(),
        ]
    );

    let enemy = host.ctx.enemy.as_mut().unwrap();
    host.engine.tick_statuses(enemy, TickPhase::EndTurn);
    assert_eq!(enemy.stat(Stat::Hp), Some(37));
}

/// Combos that change nothing on a bare run record still return their
/// message but do not count towards achievements.
#[test]
fn test_ineffective_combos_not_counted() {
    let mut host = Host::new(Actor::new(ActorId::new(0)));
    let book = Rc::new(RefCell::new(AchievementBook::new()));
    AchievementBook::attach(Rc::clone(&book), &mut host.bus).unwrap();

    for _ in 0..5 {
        let messages = host.play("Cake", &["Sweet", "Sweet"]);
        assert_eq!(messages.len(), 1);
    }
    let fired = host.detector.last_fired().unwrap();
    assert_eq!(fired.applied, 0);
    assert_eq!(fired.skipped, vec!["player has no sweetness".to_string()]);
    assert!(book.borrow().unlocked().is_empty());

    host.ctx.player.set_stat(Stat::Sweetness, 0);
    for _ in 0..5 {
        host.play("Cake", &["Sweet", "Sweet"]);
    }
    assert_eq!(book.borrow().unlocked()[0].id, "synergy-master");
}

/// Run reset drops relics and modifiers but keeps their registries.
#[test]
fn test_reset_between_runs() {
    let mut host = Host::new(chef());
    host.relics.add("crystal-vial").unwrap();
    host.modifiers.add("spice-mastery", &mut host.ctx, &mut host.bus).unwrap();

    host.relics.reset();
    host.modifiers.reset();
    host.detector.reset();

    assert!(host.relics.active().is_empty());
    assert!(host.modifiers.active().is_empty());
    assert!(host.detector.last_fired().is_none());
    assert_eq!(host.relics.available().len(), 6);
    assert_eq!(host.modifiers.available().len(), 6);
    assert_eq!(host.ctx.get_state("spiceDiscount", 0), 1);
}
