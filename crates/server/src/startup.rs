use std::{net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use common::env::ensure_data_dir;
use configs::AppConfig;
use service::{
    notify::{ConsoleNotifier, Notifier},
    registry::Registry,
    storage::{JsonSnapshotFile, SnapshotStore},
};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the registry on the configured snapshot file and install the notifier.
pub async fn build_state(cfg: &AppConfig) -> Result<AppState, StartupError> {
    let snapshot_path = Path::new(&cfg.storage.snapshot_path);
    ensure_data_dir(snapshot_path).await?;

    let snapshots: Arc<dyn SnapshotStore> = Arc::new(JsonSnapshotFile::new(snapshot_path));
    let registry = Registry::open(snapshots).await?;

    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier::stdout(cfg.notifier.kind));
    info!(snapshot = %snapshot_path.display(), notifier = ?cfg.notifier.kind, "registry ready");
    Ok(AppState::new(registry, notifier))
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    cfg.server
        .bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {}: {e}", cfg.server.bind_addr())))
}

/// Serve with an already loaded config.
pub async fn run_with(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg).await?;
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting vaccination registry");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
