//! Hook bus for external reactors.
//!
//! Achievements and third-party plugins observe the engine through the
//! [`HookBus`]. Each extension registers once under a
//! unique ID with handlers keyed by event name; the engine and the host loop
//! dispatch [`HookEvent`]s to them.
//!
//! ## Key Components
//!
//! - [`HookEvent`]: An event with its payload
//! - [`HookRegistration`]: Extension metadata plus handlers
//! - [`HookBus`]: Registration, dispatch and listing
//! - [`DispatchReport`]: Delivered count and isolated failures
//!
//! ## Failure Isolation
//!
//! A handler that returns an error or panics is logged and recorded in the
//! report.
//! Later handlers for the same event still run, and the error never reaches
//! the code that dispatched the event.

mod bus;
mod event;

pub use bus::{DispatchReport, HookBus, HookHandler, HookId, HookInfo, HookRegistration, DEFAULT_VERSION};
pub use event::{
    HookEvent, StatusApplied, SynergyTriggered, CARD_PLAY, ENEMY_ACTION, ENEMY_SPAWN, INIT,
    STATUS_APPLIED, SYNERGY_TRIGGERED, TURN_END, TURN_START,
};
