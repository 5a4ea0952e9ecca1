//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the directory that will hold the snapshot file exists.
///
/// A path without a parent component (e.g. `registry.json`) lives in the
/// working directory and needs nothing.
pub async fn ensure_data_dir(snapshot_path: &Path) -> anyhow::Result<()> {
    let Some(dir) = snapshot_path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    if tokio::fs::metadata(dir).await.is_err() {
        warn!(dir = %dir.display(), "data directory not found; creating it");
    }
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
    info!(dir = %dir.display(), "data directory ready");
    Ok(())
}
