//! Status engine - applying, ticking and querying statuses.
//!
//! The engine is stateless apart from its injected registry: all status
//! state lives on the actors passed in. Cloning an engine is cheap.

use std::sync::Arc;

use crate::core::{isolate, Actor, EngineConfig, EngineError, Outcome};
use crate::hooks::{HookBus, HookEvent, StatusApplied};

use super::definition::{Amount, EffectKind, TickPhase};
use super::instance::{StatusInstance, StatusRecord};
use super::registry::StatusRegistry;

/// How `apply_status` changed the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Application {
    /// A new instance was appended.
    Created,
    /// An existing instance absorbed the application.
    Merged,
}

/// Applies, ticks and queries statuses against a registry.
#[derive(Clone, Debug)]
pub struct StatusEngine {
    registry: Arc<StatusRegistry>,
    default_stacks: u32,
    default_duration: u32,
}

impl StatusEngine {
    /// Create an engine with the default configuration.
    #[must_use]
    pub fn new(registry: Arc<StatusRegistry>) -> Self {
        Self::with_config(registry, &EngineConfig::default())
    }

    /// Create an engine taking its defaults from `config`.
    #[must_use]
    pub fn with_config(registry: Arc<StatusRegistry>, config: &EngineConfig) -> Self {
        Self {
            registry,
            default_stacks: config.default_stacks,
            default_duration: config.default_duration,
        }
    }

    /// The injected registry.
    #[must_use]
    pub fn registry(&self) -> &StatusRegistry {
        &self.registry
    }

    /// Build a new instance of `name`.
    ///
    /// Fails with `UnknownStatusKind` if the name is not registered. The
    /// instance is not attached to any actor.
    pub fn create_status(
        &self,
        name: &str,
        stacks: u32,
        duration: u32,
    ) -> Result<StatusInstance, EngineError> {
        self.registry
            .get(name)
            .map(|def| StatusInstance::from_definition(def, stacks, duration))
            .ok_or_else(|| EngineError::UnknownStatusKind(name.to_string()))
    }

    /// Apply a status to `target`, merging with an existing instance.
    ///
    /// On success a `statusApplied` event carrying this call's stacks and
    /// duration is dispatched on `bus`. An unknown name is logged and
    /// returned as an error; the target is untouched and no event fires.
    pub fn apply_status(
        &self,
        bus: &mut HookBus,
        target: &mut Actor,
        name: &str,
        stacks: u32,
        duration: u32,
    ) -> Result<Application, EngineError> {
        let application = match target.status_mut(name) {
            Some(existing) => {
                existing.merge(stacks, duration);
                tracing::debug!(
                    actor = target_label(target.name.as_deref()),
                    status = name,
                    stacks,
                    duration,
                    "status merged"
                );
                Application::Merged
            }
            None => {
                let instance = match self.create_status(name, stacks, duration) {
                    Ok(instance) => instance,
                    Err(err) => {
                        tracing::warn!(status = name, "cannot apply unknown status");
                        return Err(err);
                    }
                };
                target.statuses.push_back(instance);
                tracing::debug!(
                    actor = target_label(target.name.as_deref()),
                    status = name,
                    stacks,
                    duration,
                    "status applied"
                );
                Application::Created
            }
        };

        bus.dispatch(&HookEvent::StatusApplied(StatusApplied {
            target_id: target.id,
            target: target_label(target.name.as_deref()).to_string(),
            status: name.to_string(),
            stacks,
            duration,
        }));

        Ok(application)
    }

    /// Apply a status with the configured default stacks and duration.
    pub fn apply_default(
        &self,
        bus: &mut HookBus,
        target: &mut Actor,
        name: &str,
    ) -> Result<Application, EngineError> {
        self.apply_status(bus, target, name, self.default_stacks, self.default_duration)
    }

    /// Run one tick pass for `phase`.
    ///
    /// Statuses ticking in `phase` run in insertion order over a snapshot
    /// taken on entry, so statuses added by a handler wait for the next
    /// matching phase. Each ticked status loses one duration even if its
    /// handler failed. Afterwards every expired status is removed,
    /// whatever its phase. Returns the messages the handlers produced.
    pub fn tick_statuses(&self, target: &mut Actor, phase: TickPhase) -> Vec<String> {
        let snapshot = target.statuses.clone();
        let mut messages = Vec::new();

        for status in snapshot.iter().filter(|s| s.tick_phase == phase) {
            match self.registry.get(&status.name) {
                Some(def) => {
                    let origin = format!("status {} tick", status.name);
                    if let Outcome::Completed(Some(message)) =
                        isolate(&origin, || def.run_tick(target, status.stacks))
                    {
                        messages.push(message);
                    }
                }
                None => {
                    tracing::warn!(status = %status.name, "ticking status with no definition");
                }
            }

            if let Some(live) = target.status_mut(&status.name) {
                live.decay();
            }
        }

        let actor = target_label(target.name.as_deref());
        for expired in target.statuses.iter().filter(|s| s.is_expired()) {
            tracing::debug!(actor, status = %expired.name, "status expired");
        }
        let before = target.statuses.len();
        target.statuses.retain(|s| !s.is_expired());
        tracing::trace!(
            actor = target_label(target.name.as_deref()),
            phase = phase.as_str(),
            messages = messages.len(),
            expired = before - target.statuses.len(),
            "statuses ticked"
        );

        messages
    }

    /// Sum of the flat amounts of every descriptor of `kind` on `target`.
    #[must_use]
    pub fn get_status_modifier(&self, target: &Actor, kind: &EffectKind) -> i64 {
        self.descriptor_sum(target, kind, |amount, stacks| amount.flat(stacks))
    }

    /// Sum of the percent amounts of every descriptor of `kind` on `target`.
    #[must_use]
    pub fn get_percent_modifier(&self, target: &Actor, kind: &EffectKind) -> i64 {
        self.descriptor_sum(target, kind, |amount, _| amount.percent())
    }

    fn descriptor_sum<F>(&self, target: &Actor, kind: &EffectKind, value: F) -> i64
    where
        F: Fn(Amount, u32) -> i64,
    {
        let mut total = 0;
        for status in target.statuses.iter() {
            let Some(def) = self.registry.get(&status.name) else {
                continue;
            };
            for effect in def.effects.iter().filter(|e| &e.kind == kind) {
                total += value(effect.amount, status.stacks);
            }
        }
        total
    }

    /// Check if `target` carries a status.
    #[must_use]
    pub fn has_status(&self, target: &Actor, name: &str) -> bool {
        target.status(name).is_some()
    }

    /// Remove every status from `target`.
    pub fn clear_statuses(&self, target: &mut Actor) {
        target.statuses.clear();
    }

    /// The target's statuses as persisted records, in order.
    #[must_use]
    pub fn snapshot(&self, target: &Actor) -> Vec<StatusRecord> {
        target.statuses.iter().map(StatusInstance::record).collect()
    }

    /// Replace the target's statuses with persisted records.
    ///
    /// Every name is checked first; on `UnknownStatusKind` the target is left
    /// untouched. Repeated names merge by the stacking rule and expired
    /// records are dropped. No events are dispatched.
    pub fn restore(&self, target: &mut Actor, records: &[StatusRecord]) -> Result<(), EngineError> {
        if let Some(unknown) = records.iter().find(|r| !self.registry.contains(&r.name)) {
            tracing::warn!(status = %unknown.name, "snapshot references unknown status");
            return Err(EngineError::UnknownStatusKind(unknown.name.clone()));
        }

        target.statuses.clear();
        for record in records.iter().filter(|r| r.duration > 0) {
            match target.status_mut(&record.name) {
                Some(existing) => existing.merge(record.stacks, record.duration),
                None => {
                    let instance = self.create_status(&record.name, record.stacks, record.duration)?;
                    target.statuses.push_back(instance);
                }
            }
        }
        Ok(())
    }
}

fn target_label(name: Option<&str>) -> &str {
    name.unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::core::{ActorId, HandlerError, Stat};
    use crate::hooks::{HookRegistration, STATUS_APPLIED};
    use crate::status::{StatusCategory, StatusDefinition, TickRule};

    fn engine() -> StatusEngine {
        StatusEngine::new(Arc::new(StatusRegistry::standard()))
    }

    fn gremlin() -> Actor {
        Actor::combatant(ActorId::new(1), "Gremlin", 20)
    }

    #[test]
    fn test_create_matches_definition() {
        let engine = engine();
        for def in engine.registry().iter() {
            let instance = engine.create_status(&def.name, 1, 1).unwrap();
            assert_eq!(instance.category, def.category);
            assert_eq!(instance.tick_phase, def.tick_phase);
        }
    }

    #[test]
    fn test_create_unknown() {
        let err = engine().create_status("Frostbite", 1, 1).unwrap_err();
        assert!(matches!(err, EngineError::UnknownStatusKind(ref n) if n == "Frostbite"));
    }

    #[test]
    fn test_apply_appends_in_order() {
        let engine = engine();
        let mut bus = HookBus::new();
        let mut target = gremlin();

        engine.apply_status(&mut bus, &mut target, "Burn", 1, 2).unwrap();
        engine.apply_status(&mut bus, &mut target, "Sap", 1, 2).unwrap();
        engine.apply_status(&mut bus, &mut target, "Fortify", 1, 2).unwrap();

        let names: Vec<_> = target.statuses().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Burn", "Sap", "Fortify"]);
    }

    #[test]
    fn test_merge_law() {
        let engine = engine();
        let mut bus = HookBus::new();
        let mut target = gremlin();

        let first = engine.apply_status(&mut bus, &mut target, "Burn", 2, 2).unwrap();
        let second = engine.apply_status(&mut bus, &mut target, "Burn", 3, 1).unwrap();

        assert_eq!(first, Application::Created);
        assert_eq!(second, Application::Merged);
        assert_eq!(target.statuses().len(), 1);
        let burn = target.status("Burn").unwrap();
        assert_eq!(burn.stacks, 5);
        assert_eq!(burn.duration, 2);
    }

    #[test]
    fn test_apply_emits_event() {
        let engine = engine();
        let mut bus = HookBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let log = Rc::clone(&seen);
        bus.register(HookRegistration::new("watcher").on(STATUS_APPLIED, move |event| {
            log.borrow_mut().push(event.clone());
            Ok(())
        }))
        .unwrap();

        let mut target = gremlin();
        engine.apply_status(&mut bus, &mut target, "Burn", 2, 3).unwrap();

        let events = seen.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0],
            HookEvent::StatusApplied(StatusApplied {
                target_id: ActorId::new(1),
                target: "Gremlin".to_string(),
                status: "Burn".to_string(),
                stacks: 2,
                duration: 3,
            })
        );
    }

    #[test]
    fn test_apply_unknown_is_silent() {
        let engine = engine();
        let mut bus = HookBus::new();
        let fired = Rc::new(RefCell::new(0));

        let count = Rc::clone(&fired);
        bus.register(HookRegistration::new("watcher").on(STATUS_APPLIED, move |_| {
            *count.borrow_mut() += 1;
            Ok(())
        }))
        .unwrap();

        let mut target = gremlin();
        let before = target.clone();
        let result = engine.apply_status(&mut bus, &mut target, "Frostbite", 1, 2);

        assert!(matches!(result, Err(EngineError::UnknownStatusKind(_))));
        assert_eq!(target, before);
        assert_eq!(*fired.borrow(), 0);
    }

    #[test]
    fn test_apply_default_uses_config() {
        let config = EngineConfig::new().with_default_stacks(2).with_default_duration(4);
        let engine = StatusEngine::with_config(Arc::new(StatusRegistry::standard()), &config);
        let mut bus = HookBus::new();
        let mut target = gremlin();

        engine.apply_default(&mut bus, &mut target, "Regen").unwrap();
        let regen = target.status("Regen").unwrap();
        assert_eq!((regen.stacks, regen.duration), (2, 4));
    }

    #[test]
    fn test_burn_tick_and_decay() {
        let engine = engine();
        let mut bus = HookBus::new();
        let mut target = Actor::new(ActorId::new(1)).with_stat(Stat::Hp, 20);

        engine.apply_status(&mut bus, &mut target, "Burn", 3, 2).unwrap();

        let messages = engine.tick_statuses(&mut target, TickPhase::EndTurn);
        assert_eq!(messages, vec!["Target suffers 3 Burn damage".to_string()]);
        assert_eq!(target.stat(Stat::Hp), Some(17));
        assert_eq!(target.status("Burn").unwrap().duration, 1);

        engine.tick_statuses(&mut target, TickPhase::EndTurn);
        assert_eq!(target.stat(Stat::Hp), Some(14));
        assert!(target.statuses().is_empty());
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_expiry_logged_per_status() {
        let engine = engine();
        let mut bus = HookBus::new();
        let mut target = gremlin();
        engine.apply_status(&mut bus, &mut target, "Burn", 1, 1).unwrap();
        engine.apply_status(&mut bus, &mut target, "Regen", 1, 1).unwrap();
        engine.apply_status(&mut bus, &mut target, "Vigor", 1, 2).unwrap();

        let buffer = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(buffer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            engine.tick_statuses(&mut target, TickPhase::EndTurn);
        });

        let logs = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        let expired: Vec<_> = logs.lines().filter(|l| l.contains("status expired")).collect();
        assert_eq!(expired.len(), 2);
        assert!(expired[0].contains("status=Burn"));
        assert!(expired[1].contains("status=Regen"));
        assert!(engine.has_status(&target, "Vigor"));
    }

    #[test]
    fn test_tick_other_phase_untouched() {
        let engine = engine();
        let mut bus = HookBus::new();
        let mut target = gremlin();

        engine.apply_status(&mut bus, &mut target, "Burn", 3, 2).unwrap();
        let messages = engine.tick_statuses(&mut target, TickPhase::StartTurn);

        assert!(messages.is_empty());
        assert_eq!(target.stat(Stat::Hp), Some(20));
        assert_eq!(target.status("Burn").unwrap().duration, 2);
    }

    #[test]
    fn test_tick_removes_expired_of_any_phase() {
        let engine = engine();
        let mut bus = HookBus::new();
        let mut target = gremlin();

        engine.apply_status(&mut bus, &mut target, "Fortify", 2, 0).unwrap();
        engine.apply_status(&mut bus, &mut target, "Burn", 1, 3).unwrap();
        engine.tick_statuses(&mut target, TickPhase::EndTurn);

        assert!(!engine.has_status(&target, "Fortify"));
        assert!(engine.has_status(&target, "Burn"));
    }

    #[test]
    fn test_tick_failure_isolated() {
        let mut registry = StatusRegistry::standard();
        registry
            .register(
                StatusDefinition::new("Hex", StatusCategory::Debuff, TickPhase::EndTurn)
                    .with_handler(|_, _| Err(HandlerError::new("hex misfired"))),
            )
            .unwrap();
        let engine = StatusEngine::new(Arc::new(registry));
        let mut bus = HookBus::new();
        let mut target = gremlin();

        engine.apply_status(&mut bus, &mut target, "Hex", 1, 2).unwrap();
        engine.apply_status(&mut bus, &mut target, "Burn", 2, 2).unwrap();

        let messages = engine.tick_statuses(&mut target, TickPhase::EndTurn);
        assert_eq!(messages, vec!["Gremlin suffers 2 Burn damage".to_string()]);
        assert_eq!(target.stat(Stat::Hp), Some(18));
        assert_eq!(target.status("Hex").unwrap().duration, 1);
    }

    #[test]
    fn test_panics_leave_turn_consistent() {
        let mut registry = StatusRegistry::standard();
        registry
            .register(
                StatusDefinition::new("Hex", StatusCategory::Debuff, TickPhase::EndTurn)
                    .with_handler(|_, _| panic!("hex exploded")),
            )
            .unwrap();
        let engine = StatusEngine::new(Arc::new(registry));
        let mut bus = HookBus::new();
        bus.register(
            HookRegistration::new("cursed-relic").on(STATUS_APPLIED, |_| panic!("relic exploded")),
        )
        .unwrap();

        let mut target = gremlin();
        target.set_stat(Stat::Hp, 15);
        engine.apply_status(&mut bus, &mut target, "Burn", 3, 1).unwrap();
        engine.apply_status(&mut bus, &mut target, "Hex", 1, 2).unwrap();
        engine.apply_status(&mut bus, &mut target, "Regen", 1, 1).unwrap();
        assert_eq!(target.statuses().len(), 3);

        let messages = engine.tick_statuses(&mut target, TickPhase::EndTurn);

        assert_eq!(
            messages,
            vec![
                "Gremlin suffers 3 Burn damage".to_string(),
                "Regen heals 1 HP".to_string(),
            ]
        );
        assert_eq!(target.stat(Stat::Hp), Some(13));
        assert!(!engine.has_status(&target, "Burn"));
        assert!(!engine.has_status(&target, "Regen"));
        assert_eq!(target.status("Hex").unwrap().duration, 1);
    }

    #[test]
    fn test_status_added_mid_tick_waits() {
        let mut registry = StatusRegistry::standard();
        let burn = registry.get("Burn").cloned().unwrap();
        registry
            .register(
                StatusDefinition::new("Kindling", StatusCategory::Debuff, TickPhase::EndTurn)
                    .with_handler(move |holder, _| {
                        holder
                            .statuses
                            .push_back(StatusInstance::from_definition(&burn, 4, 1));
                        Ok(Some("Kindling ignites".to_string()))
                    }),
            )
            .unwrap();
        let engine = StatusEngine::new(Arc::new(registry));
        let mut bus = HookBus::new();
        let mut target = gremlin();

        engine.apply_status(&mut bus, &mut target, "Kindling", 1, 1).unwrap();
        let messages = engine.tick_statuses(&mut target, TickPhase::EndTurn);

        assert_eq!(messages, vec!["Kindling ignites".to_string()]);
        assert_eq!(target.stat(Stat::Hp), Some(20));
        assert_eq!(target.status("Burn").unwrap().duration, 1);
        assert!(!engine.has_status(&target, "Kindling"));
    }

    #[test]
    fn test_status_modifier() {
        let engine = engine();
        let mut bus = HookBus::new();
        let mut target = gremlin();

        assert_eq!(engine.get_status_modifier(&target, &EffectKind::DamageReduction), 0);

        engine.apply_status(&mut bus, &mut target, "Fortify", 3, 2).unwrap();
        engine.apply_status(&mut bus, &mut target, "Sap", 1, 2).unwrap();
        engine.apply_status(&mut bus, &mut target, "Stick", 1, 2).unwrap();

        assert_eq!(engine.get_status_modifier(&target, &EffectKind::DamageReduction), 3);
        assert_eq!(engine.get_status_modifier(&target, &EffectKind::EnergyDrain), 1);
        assert_eq!(engine.get_status_modifier(&target, &EffectKind::Heal), 0);
        assert_eq!(engine.get_percent_modifier(&target, &EffectKind::DamageReduction), 25);
    }

    #[test]
    fn test_clear_statuses() {
        let engine = engine();
        let mut bus = HookBus::new();
        let mut target = gremlin();

        engine.apply_status(&mut bus, &mut target, "Burn", 1, 2).unwrap();
        engine.apply_status(&mut bus, &mut target, "Regen", 1, 2).unwrap();
        engine.clear_statuses(&mut target);

        assert!(target.statuses().is_empty());
        assert!(!engine.has_status(&target, "Burn"));
    }

    #[test]
    fn test_snapshot_restore() {
        let engine = engine();
        let mut bus = HookBus::new();
        let mut target = gremlin();

        engine.apply_status(&mut bus, &mut target, "Burn", 3, 2).unwrap();
        engine.apply_status(&mut bus, &mut target, "Vigor", 1, 4).unwrap();
        let records = engine.snapshot(&target);

        let mut fresh = gremlin();
        engine.restore(&mut fresh, &records).unwrap();
        assert_eq!(fresh.statuses(), target.statuses());
    }

    #[test]
    fn test_restore_rejects_unknown() {
        let engine = engine();
        let mut bus = HookBus::new();
        let mut target = gremlin();
        engine.apply_status(&mut bus, &mut target, "Burn", 1, 2).unwrap();

        let records = vec![
            StatusRecord::new("Regen", 1, 2),
            StatusRecord::new("Frostbite", 1, 2),
        ];
        assert!(engine.restore(&mut target, &records).is_err());
        assert!(engine.has_status(&target, "Burn"));
        assert!(!engine.has_status(&target, "Regen"));
    }

    #[test]
    fn test_restore_merges_and_drops_expired() {
        let engine = engine();
        let mut target = gremlin();
        let records = vec![
            StatusRecord::new("Burn", 2, 2),
            StatusRecord::new("Burn", 1, 3),
            StatusRecord::new("Sap", 1, 0),
        ];

        engine.restore(&mut target, &records).unwrap();
        assert_eq!(target.statuses().len(), 1);
        let burn = target.status("Burn").unwrap();
        assert_eq!((burn.stacks, burn.duration), (3, 3));
    }

    #[test]
    fn test_silent_rule_produces_no_message() {
        let mut registry = StatusRegistry::new();
        registry
            .register(
                StatusDefinition::new("Mark", StatusCategory::Debuff, TickPhase::StartTurn)
                    .with_tick(TickRule::Silent),
            )
            .unwrap();
        let engine = StatusEngine::new(Arc::new(registry));
        let mut bus = HookBus::new();
        let mut target = gremlin();

        engine.apply_status(&mut bus, &mut target, "Mark", 1, 1).unwrap();
        assert!(engine.tick_statuses(&mut target, TickPhase::StartTurn).is_empty());
        assert!(target.statuses().is_empty());
    }
}
