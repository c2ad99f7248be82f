//! Run snapshots.
//!
//! A snapshot holds only what the engine owns: each actor's ordered
//! `{name, stacks, duration}` status list and the literal tag sequence in the
//! synergy window. Actor stats belong to the host's own save data.

use serde::{Deserialize, Serialize};

use crate::core::{ActorId, EffectContext, EngineError};
use crate::status::{StatusEngine, StatusRecord};
use crate::synergy::SynergyDetector;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Persisted statuses of one actor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    pub id: ActorId,
    pub statuses: Vec<StatusRecord>,
}

/// Engine-owned run state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub version: u32,
    pub turn: u32,
    pub actors: Vec<ActorSnapshot>,
    pub window: Vec<String>,
}

impl RunSnapshot {
    /// Capture the player, the enemy if any, and the synergy window.
    #[must_use]
    pub fn capture(ctx: &EffectContext, statuses: &StatusEngine, detector: &SynergyDetector) -> Self {
        let actors = std::iter::once(&ctx.player)
            .chain(ctx.enemy.as_ref())
            .map(|actor| ActorSnapshot {
                id: actor.id,
                statuses: statuses.snapshot(actor),
            })
            .collect();

        Self {
            version: SNAPSHOT_VERSION,
            turn: ctx.turn,
            actors,
            window: detector.snapshot(),
        }
    }

    /// Write the snapshot back into a context and detector.
    ///
    /// Every status name is checked before anything is touched, so a
    /// snapshot with an unknown status leaves the run unchanged. Actors not
    /// present in `ctx` are skipped.
    pub fn restore_into(
        &self,
        ctx: &mut EffectContext,
        statuses: &StatusEngine,
        detector: &mut SynergyDetector,
    ) -> Result<(), EngineError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(EngineError::InvalidConfig(format!(
                "unsupported snapshot version {}",
                self.version
            )));
        }

        let unknown = self
            .actors
            .iter()
            .flat_map(|actor| actor.statuses.iter())
            .find(|record| !statuses.registry().contains(&record.name));
        if let Some(record) = unknown {
            return Err(EngineError::UnknownStatusKind(record.name.clone()));
        }

        for saved in &self.actors {
            match ctx.actor_mut(saved.id) {
                Some(actor) => statuses.restore(actor, &saved.statuses)?,
                None => tracing::warn!(actor = %saved.id, "snapshot actor not in context"),
            }
        }
        ctx.turn = self.turn;
        detector.restore(self.window.iter().cloned());
        Ok(())
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EngineError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EngineError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }
}
