//! Core engine types: actors, the shared effect context, configuration,
//! errors and the failure-isolation wrapper.
//!
//! Everything else in the crate reads and writes these types.

pub mod actor;
pub mod config;
pub mod context;
pub mod error;
pub mod isolation;

pub use actor::{Actor, ActorId, Capabilities, Stat};
pub use config::{EngineConfig, MIN_SYNERGY_WINDOW};
pub use context::EffectContext;
pub use error::{EngineError, HandlerError};
pub use isolation::{isolate, Failure, Outcome};
