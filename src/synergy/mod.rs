//! Card-tag synergies.
//!
//! Cards carry flavor tags (`Spice`, `Umami`, `Sweet`, ...). The
//! [`SynergyDetector`] keeps a short window of the most recently played tags
//! and, when the last two form a registered combo, resolves the combo's
//! effect on the [`EffectContext`](crate::core::EffectContext) and announces
//! it on the hook bus.
//!
//! ## Key Components
//!
//! - [`SynergyWindow`]: Bounded FIFO of recent tags
//! - [`ComboDefinition`]: What a tag pair does, as an [`Effect`](crate::effects::Effect)
//! - [`ComboRegistry`]: Commutative pair lookup
//! - [`SynergyDetector`]: Records plays and fires combos

mod combo;
mod detector;
mod registry;
mod window;

pub use combo::{combo_key, ComboDefinition};
pub use detector::{SynergyDetector, SynergyListing};
pub use registry::ComboRegistry;
pub use window::SynergyWindow;
