use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use async_trait::async_trait;

use super::SnapshotStore;
use crate::errors::ServiceError;
use crate::registry::model::Snapshot;

/// Process-local snapshot slot. Counts saves so callers can check when
/// persistence happened.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    slot: Mutex<Option<Snapshot>>,
    saves: AtomicUsize,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self { slot: Mutex::new(Some(snapshot)), saves: AtomicUsize::new(0) }
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn current(&self) -> Option<Snapshot> {
        self.slot.lock().ok().and_then(|s| s.clone())
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn load(&self) -> Result<Option<Snapshot>, ServiceError> {
        let slot = self.slot.lock().map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(slot.clone())
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<(), ServiceError> {
        let mut slot = self.slot.lock().map_err(|e| ServiceError::Storage(e.to_string()))?;
        *slot = Some(snapshot.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
