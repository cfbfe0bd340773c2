#[cfg(feature = "storage-memory")]
use crate::MemoryClipStore;
#[cfg(feature = "storage-s3")]
use crate::S3ClipStore;
use crate::{ClipStore, StorageBackend, StorageError, StorageResult};
use livecam_core::Config;
use std::sync::Arc;

/// Create a storage backend based on configuration
pub fn create_storage(config: &Config) -> StorageResult<Arc<dyn ClipStore>> {
    match config.storage.backend {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let bucket = config.storage.bucket.clone().ok_or_else(|| {
                StorageError::ConfigError("S3_BUCKET_NAME not configured".to_string())
            })?;
            let region = config
                .storage
                .region
                .clone()
                .ok_or_else(|| StorageError::ConfigError("AWS_REGION not configured".to_string()))?;
            let endpoint = config.storage.endpoint.clone();

            let storage = S3ClipStore::new(bucket, region, endpoint)?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-memory")]
        StorageBackend::Memory => {
            let base_url = format!("http://localhost:{}/clips", config.server_port());
            Ok(Arc::new(MemoryClipStore::with_base_url(base_url)))
        }

        #[cfg(not(feature = "storage-memory"))]
        StorageBackend::Memory => Err(StorageError::ConfigError(
            "Memory storage backend not available (storage-memory feature not enabled)"
                .to_string(),
        )),
    }
}
