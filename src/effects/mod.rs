//! Effect system shared by combos, relics and run modifiers.
//!
//! - `Effect`: data describing a change to the shared context
//! - `EffectResolver`: applies effects and reports each leaf's `Resolution`
//!
//! Effects operate on three things: the player's stat pools, the run state
//! key-value map, and the current enemy's statuses. Content defines what
//! the run state keys mean; the engine only stores them.

mod effect;
mod resolver;

pub use effect::Effect;
pub use resolver::{EffectResolver, Resolution};
