//! Save storage contract and an in-memory implementation.

use std::sync::RwLock;

use crate::core::EngineError;

use super::snapshot::RunSnapshot;

/// Host-provided storage for the encoded run snapshot.
///
/// The engine never decides when to save; the host calls these at its own
/// checkpoints.
pub trait SaveStore: Send + Sync {
    /// Replace the stored blob.
    fn save(&self, blob: &[u8]) -> Result<(), EngineError>;

    /// Load the stored blob, `None` if nothing has been saved.
    fn load(&self) -> Result<Option<Vec<u8>>, EngineError>;

    /// Remove the stored blob.
    fn clear(&self) -> Result<(), EngineError>;

    /// Encode and store a snapshot.
    fn save_run(&self, snapshot: &RunSnapshot) -> Result<(), EngineError> {
        self.save(&snapshot.to_bytes()?)
    }

    /// Load and decode a snapshot.
    fn load_run(&self) -> Result<Option<RunSnapshot>, EngineError> {
        self.load()?
            .map(|bytes| RunSnapshot::from_bytes(&bytes))
            .transpose()
    }
}

/// In-memory store for tests and local runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: RwLock<Option<Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> EngineError {
    EngineError::Store("lock poisoned".to_string())
}

impl SaveStore for MemoryStore {
    fn save(&self, blob: &[u8]) -> Result<(), EngineError> {
        let mut slot = self.blob.write().map_err(|_| poisoned())?;
        *slot = Some(blob.to_vec());
        Ok(())
    }

    fn load(&self) -> Result<Option<Vec<u8>>, EngineError> {
        let slot = self.blob.read().map_err(|_| poisoned())?;
        Ok(slot.clone())
    }

    fn clear(&self) -> Result<(), EngineError> {
        let mut slot = self.blob.write().map_err(|_| poisoned())?;
        *slot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ActorId;
    use crate::persistence::{ActorSnapshot, SNAPSHOT_VERSION};
    use crate::status::StatusRecord;

    fn snapshot() -> RunSnapshot {
        RunSnapshot {
            version: SNAPSHOT_VERSION,
            turn: 3,
            actors: vec![ActorSnapshot {
                id: ActorId::new(1),
                statuses: vec![StatusRecord::new("Burn", 2, 1)],
            }],
            window: vec!["Sweet".to_string()],
        }
    }

    #[test]
    fn test_empty_store() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
        assert!(store.load_run().unwrap().is_none());
    }

    #[test]
    fn test_save_load_clear() {
        let store = MemoryStore::new();
        store.save_run(&snapshot()).unwrap();
        assert_eq!(store.load_run().unwrap(), Some(snapshot()));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_replaces() {
        let store = MemoryStore::new();
        store.save(b"first").unwrap();
        store.save(b"second").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some(&b"second"[..]));
    }
}
