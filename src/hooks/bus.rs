//! Hook bus.
//!
//! The bus stores extension registrations (relics, run modifiers,
//! achievements, third-party plugins) and delivers events to them. Handlers
//! run in registration order and each call is isolated: a failing handler is
//! logged and skipped, and the rest of the dispatch carries on.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{isolate, EngineError, Failure, HandlerError, Outcome};

use super::event::{HookEvent, INIT};

/// Version assigned to registrations that do not declare one.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// An event handler. Handlers may keep their own state.
pub type HookHandler = Box<dyn FnMut(&HookEvent) -> Result<(), HandlerError>>;

/// Unique identifier for a registration.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HookId(pub String);

impl HookId {
    /// Create a new hook ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HookId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for HookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Public metadata of a registration. Handlers are not exposed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookInfo {
    pub id: HookId,
    pub name: String,
    pub version: String,
}

/// An extension registration: metadata plus handlers keyed by event name.
pub struct HookRegistration {
    /// Unique identifier.
    pub id: HookId,

    /// Human-readable name. Defaults to the ID.
    pub name: String,

    /// Extension version.
    pub version: String,

    handlers: FxHashMap<String, HookHandler>,
}

impl HookRegistration {
    /// Create a registration with no handlers.
    pub fn new(id: impl Into<HookId>) -> Self {
        let id = id.into();
        Self {
            name: id.0.clone(),
            id,
            version: DEFAULT_VERSION.to_string(),
            handlers: FxHashMap::default(),
        }
    }

    /// Set the display name (builder pattern).
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the version (builder pattern).
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Bind a handler to an event name (builder pattern).
    ///
    /// Binding the same event twice replaces the earlier handler.
    #[must_use]
    pub fn on<F>(mut self, event: impl Into<String>, handler: F) -> Self
    where
        F: FnMut(&HookEvent) -> Result<(), HandlerError> + 'static,
    {
        self.handlers.insert(event.into(), Box::new(handler));
        self
    }

    /// Bind the `init` handler, run once at registration (builder pattern).
    #[must_use]
    pub fn on_init<F>(self, handler: F) -> Self
    where
        F: FnMut(&HookEvent) -> Result<(), HandlerError> + 'static,
    {
        self.on(INIT, handler)
    }

    /// Check whether a handler is bound to an event.
    #[must_use]
    pub fn handles(&self, event: &str) -> bool {
        self.handlers.contains_key(event)
    }

    /// Public metadata.
    #[must_use]
    pub fn info(&self) -> HookInfo {
        HookInfo {
            id: self.id.clone(),
            name: self.name.clone(),
            version: self.version.clone(),
        }
    }

    fn invoke(&mut self, event: &HookEvent) -> Option<Outcome<()>> {
        let handler = self.handlers.get_mut(event.name())?;
        let origin = format!("hook {} on {}", self.id, event.name());
        Some(isolate(&origin, || handler(event)))
    }
}

impl std::fmt::Debug for HookRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut events: Vec<_> = self.handlers.keys().collect();
        events.sort();
        f.debug_struct("HookRegistration")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("version", &self.version)
            .field("events", &events)
            .finish()
    }
}

/// What happened during one dispatch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Handlers that ran to completion.
    pub delivered: usize,

    /// Handlers that reported an error, in call order.
    pub failures: Vec<Failure>,
}

impl DispatchReport {
    /// Check whether every handler completed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Registry and dispatcher for extension hooks.
///
/// ## Example
///
/// ```
/// use flavor_combat::hooks::{HookBus, HookEvent, HookRegistration, TURN_START};
///
/// let mut bus = HookBus::new();
/// bus.register(
///     HookRegistration::new("tweezers")
///         .named("Tweezers of Precision")
///         .on(TURN_START, |_| Ok(())),
/// )
/// .unwrap();
///
/// let report = bus.dispatch(&HookEvent::TurnStart { turn: 1 });
/// assert_eq!(report.delivered, 1);
/// assert!(bus.register(HookRegistration::new("tweezers")).is_err());
/// ```
#[derive(Debug, Default)]
pub struct HookBus {
    /// Registrations in registration order.
    hooks: Vec<HookRegistration>,
}

impl HookBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extension.
    ///
    /// Fails with `DuplicateHookId` if the ID is taken; the existing
    /// registration is left untouched. On success the `init` handler, if
    /// any, runs before this returns. A failing `init` is logged but does
    /// not undo the registration.
    pub fn register(&mut self, registration: HookRegistration) -> Result<(), EngineError> {
        if self.is_registered(registration.id.as_str()) {
            tracing::warn!(id = %registration.id, "hook already registered");
            return Err(EngineError::DuplicateHookId(registration.id.0));
        }

        tracing::debug!(
            id = %registration.id,
            name = %registration.name,
            version = %registration.version,
            "hook registered"
        );
        self.hooks.push(registration);

        if let Some(hook) = self.hooks.last_mut() {
            hook.invoke(&HookEvent::Init);
        }
        Ok(())
    }

    /// Remove a registration, returning its metadata.
    ///
    /// Fails with `HookNotFound` if the ID is not registered.
    pub fn unregister(&mut self, id: &str) -> Result<HookInfo, EngineError> {
        let Some(index) = self.hooks.iter().position(|h| h.id.as_str() == id) else {
            tracing::warn!(id, "cannot unregister unknown hook");
            return Err(EngineError::HookNotFound(id.to_string()));
        };
        let removed = self.hooks.remove(index);
        tracing::debug!(id, "hook unregistered");
        Ok(removed.info())
    }

    /// Deliver an event to every handler bound to its name.
    ///
    /// Handlers run in registration order. Failures are collected in the
    /// report and never propagate.
    ///
    /// `init` belongs to [`register`](Self::register): an event named
    /// `init` is refused here with an empty report, so init handlers run
    /// exactly once per registration.
    pub fn dispatch(&mut self, event: &HookEvent) -> DispatchReport {
        let mut report = DispatchReport::default();
        if event.name() == INIT {
            tracing::warn!("init is delivered on registration only");
            return report;
        }

        for hook in &mut self.hooks {
            match hook.invoke(event) {
                Some(Outcome::Completed(())) => report.delivered += 1,
                Some(Outcome::Failed(failure)) => report.failures.push(failure),
                None => {}
            }
        }

        tracing::trace!(
            event = event.name(),
            delivered = report.delivered,
            failed = report.failures.len(),
            "event dispatched"
        );
        report
    }

    /// Metadata of every registration, in registration order.
    #[must_use]
    pub fn get_registered(&self) -> Vec<HookInfo> {
        self.hooks.iter().map(HookRegistration::info).collect()
    }

    /// Check whether an ID is registered.
    #[must_use]
    pub fn is_registered(&self, id: &str) -> bool {
        self.hooks.iter().any(|h| h.id.as_str() == id)
    }

    /// Number of registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Check if the bus has no registrations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}
