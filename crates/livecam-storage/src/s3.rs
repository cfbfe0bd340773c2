use crate::traits::{ClipStore, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use http::Method;
use livecam_core::ClipObject;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::signer::Signer;
use object_store::{ObjectMeta, ObjectStore};
use std::time::Duration;

/// S3 clip store
#[derive(Clone)]
pub struct S3ClipStore {
    store: AmazonS3,
    bucket: String,
}

impl S3ClipStore {
    /// Create a new S3ClipStore instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    ///
    /// Credentials come from the standard `AWS_*` environment variables.
    pub fn new(bucket: String, region: String, endpoint_url: Option<String>) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region)
            .with_bucket_name(bucket.clone());

        if let Some(endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            // {endpoint}/{bucket}/{key}
            builder = builder
                .with_endpoint(endpoint)
                .with_allow_http(allow_http)
                .with_virtual_hosted_style_request(false);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3ClipStore { store, bucket })
    }
}

fn to_clip(meta: ObjectMeta) -> ClipObject {
    ClipObject::new(meta.location.to_string()).with_last_modified(meta.last_modified)
}

#[async_trait]
impl ClipStore for S3ClipStore {
    async fn list_objects(
        &self,
        prefix: &str,
        start_after: &str,
        max_keys: usize,
    ) -> StorageResult<Vec<ClipObject>> {
        let start = std::time::Instant::now();
        let prefix_path = Path::from(prefix);
        let offset = Path::from(start_after);

        // object_store does not forward a page size, so S3 may return up to 1000
        // keys per page; `take` cuts the listing down to `max_keys` client-side.
        let result = self
            .store
            .list_with_offset(Some(&prefix_path), &offset)
            .take(max_keys)
            .map_ok(to_clip)
            .try_collect::<Vec<_>>()
            .await;

        let clips = result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                prefix = %prefix,
                start_after = %start_after,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 listing failed"
            );
            StorageError::ListFailed(e.to_string())
        })?;

        tracing::debug!(
            bucket = %self.bucket,
            prefix = %prefix,
            count = clips.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 listing successful"
        );

        Ok(clips)
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        let location = Path::from(key);
        let url = self
            .store
            .signed_url(Method::GET, &location, expires_in)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    "S3 presign failed"
                );
                StorageError::SignFailed(e.to_string())
            })?;

        Ok(url.to_string())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
