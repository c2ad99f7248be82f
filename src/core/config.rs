//! Engine configuration.
//!
//! Hosts configure the engine once at startup. Content tables (statuses,
//! combos) are configured separately through their registries; this struct
//! only carries the tunables of the engine itself.

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Minimum synergy window: a combo needs two tags.
pub const MIN_SYNERGY_WINDOW: usize = 2;

/// Engine tunables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// How many recent card tags the synergy detector keeps.
    pub synergy_window: usize,

    /// Stacks used by `StatusEngine::apply_default`.
    pub default_stacks: u32,

    /// Duration used by `StatusEngine::apply_default`.
    pub default_duration: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            synergy_window: MIN_SYNERGY_WINDOW,
            default_stacks: 1,
            default_duration: 2,
        }
    }
}

impl EngineConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the synergy window capacity.
    #[must_use]
    pub fn with_synergy_window(mut self, capacity: usize) -> Self {
        self.synergy_window = capacity;
        self
    }

    /// Set the default stacks for status application.
    #[must_use]
    pub fn with_default_stacks(mut self, stacks: u32) -> Self {
        self.default_stacks = stacks;
        self
    }

    /// Set the default duration for status application.
    #[must_use]
    pub fn with_default_duration(mut self, duration: u32) -> Self {
        self.default_duration = duration;
        self
    }

    /// Check the configuration for values the engine cannot run with.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.synergy_window < MIN_SYNERGY_WINDOW {
            return Err(EngineError::InvalidConfig(format!(
                "synergy window must hold at least {MIN_SYNERGY_WINDOW} tags, got {}",
                self.synergy_window
            )));
        }
        if self.default_stacks == 0 {
            return Err(EngineError::InvalidConfig(
                "default stacks must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration. Missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
