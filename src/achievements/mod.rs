//! Run milestones.
//!
//! The [`AchievementBook`] counts gameplay events towards fixed thresholds
//! and unlocks each achievement once. It can observe the engine directly by
//! attaching itself to the hook bus, where it counts `synergyTriggered`.

mod book;

pub use book::{
    AchievementBook, AchievementDefinition, AchievementProgress, GameplayEvent, Unlock,
    ACHIEVEMENTS_HOOK_ID,
};
