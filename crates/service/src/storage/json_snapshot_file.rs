use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::SnapshotStore;
use crate::errors::ServiceError;
use crate::registry::model::Snapshot;

/// JSON file holding one [`Snapshot`].
///
/// `save` overwrites the file in place; there is no temp-file rename, so a
/// crash mid-write can leave a truncated file behind.
#[derive(Clone, Debug)]
pub struct JsonSnapshotFile {
    file_path: PathBuf,
}

impl JsonSnapshotFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into() }
    }
}

#[async_trait]
impl SnapshotStore for JsonSnapshotFile {
    async fn load(&self) -> Result<Option<Snapshot>, ServiceError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ServiceError::Storage(format!("read {}: {e}", self.file_path.display()))),
        };
        let snapshot: Snapshot = serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::Storage(format!("parse {}: {e}", self.file_path.display())))?;
        debug!(path = %self.file_path.display(), people = snapshot.people.len(), vaccines = snapshot.vaccines.len(), "snapshot loaded");
        Ok(Some(snapshot))
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<(), ServiceError> {
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let data = serde_json::to_vec_pretty(snapshot)?;
        fs::write(&self.file_path, data).await?;
        debug!(path = %self.file_path.display(), "snapshot saved");
        Ok(())
    }
}
