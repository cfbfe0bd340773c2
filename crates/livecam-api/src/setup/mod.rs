//! Application setup and initialization
//!
//! Start-up wiring kept out of main.rs so tests can build the same router.

pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::Result;
use livecam_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(env!("CARGO_PKG_NAME"), config.is_production())?;

    tracing::info!(
        environment = %config.environment(),
        timezone = %config.clips.timezone,
        base_prefix = %config.clips.base_prefix,
        scan_window = config.clips.scan_window,
        "Configuration loaded and validated successfully"
    );

    let store = storage::setup_storage(&config)?;

    let state = Arc::new(AppState::new(config.clone(), store));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
