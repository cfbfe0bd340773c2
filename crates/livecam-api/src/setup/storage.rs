//! Storage setup and initialization

use anyhow::Result;
use livecam_core::Config;
use livecam_storage::{create_storage, ClipStore};
use std::sync::Arc;

pub fn setup_storage(config: &Config) -> Result<Arc<dyn ClipStore>> {
    tracing::info!("Initializing clip store...");
    let storage = create_storage(config)?;
    tracing::info!(
        backend = %storage.backend_type(),
        bucket = ?config.storage.bucket,
        endpoint = ?config.storage.endpoint,
        "Clip store initialized successfully"
    );
    Ok(storage)
}
