//! Storage abstraction trait
//!
//! This module defines the `ClipStore` trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use livecam_core::ClipObject;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Listing failed: {0}")]
    ListFailed(String),

    #[error("Signing failed: {0}")]
    SignFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Read-only view of the clip bucket.
///
/// The bucket is bound when the backend is constructed, so calls only carry keys.
#[async_trait]
pub trait ClipStore: Send + Sync {
    /// List up to `max_keys` objects whose key starts with `prefix` and sorts
    /// strictly after `start_after`, in ascending key order.
    async fn list_objects(
        &self,
        prefix: &str,
        start_after: &str,
        max_keys: usize,
    ) -> StorageResult<Vec<ClipObject>>;

    /// Generate a presigned GET URL for `key`, valid for `expires_in`.
    async fn presign_get(&self, key: &str, expires_in: Duration) -> StorageResult<String>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
