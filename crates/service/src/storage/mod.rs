//! Snapshot persistence for the registry
//!
//! The whole people/vaccine state is saved and restored as one unit through
//! [`SnapshotStore`]. The file-backed implementation is what the server uses;
//! the in-memory one backs tests.

pub mod json_snapshot_file;
pub mod memory;

use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::registry::model::Snapshot;

pub use json_snapshot_file::JsonSnapshotFile;
pub use memory::MemorySnapshotStore;

/// Load/save of the full registry state.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet.
    async fn load(&self) -> Result<Option<Snapshot>, ServiceError>;
    /// Replace the stored snapshot in full.
    async fn save(&self, snapshot: &Snapshot) -> Result<(), ServiceError>;
}
