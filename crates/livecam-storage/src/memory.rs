//! In-memory clip store.
//!
//! Keeps keys in a sorted map so listings behave like an S3 `ListObjectsV2`
//! page. Used by tests and for running the server without a bucket
//! (`STORAGE_BACKEND=memory`). Signed URLs are plain links under `base_url`.

use crate::traits::{ClipStore, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use livecam_core::ClipObject;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::RwLock;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:8080/clips";

/// In-memory clip store with call counters and failure switches for tests.
pub struct MemoryClipStore {
    objects: RwLock<BTreeMap<String, ClipObject>>,
    base_url: String,
    list_calls: AtomicUsize,
    presign_calls: AtomicUsize,
    fail_listing: AtomicBool,
    fail_signing: AtomicBool,
    listing_delay_ms: AtomicU64,
    signing_delay_ms: AtomicU64,
}

impl MemoryClipStore {
    /// Creates a new empty store signing URLs under the default base URL.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            objects: RwLock::new(BTreeMap::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            list_calls: AtomicUsize::new(0),
            presign_calls: AtomicUsize::new(0),
            fail_listing: AtomicBool::new(false),
            fail_signing: AtomicBool::new(false),
            listing_delay_ms: AtomicU64::new(0),
            signing_delay_ms: AtomicU64::new(0),
        }
    }

    /// Add (or replace) an object.
    pub fn insert(&self, clip: ClipObject) -> StorageResult<()> {
        let mut objects = self
            .objects
            .write()
            .map_err(|e| StorageError::BackendError(e.to_string()))?;
        objects.insert(clip.key.clone(), clip);
        Ok(())
    }

    /// Add objects by key.
    pub fn insert_keys<I, S>(&self, keys: I) -> StorageResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for key in keys {
            self.insert(ClipObject::new(key))?;
        }
        Ok(())
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn presign_calls(&self) -> usize {
        self.presign_calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent listing fail.
    pub fn set_fail_listing(&self, fail: bool) {
        self.fail_listing.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent presign fail.
    pub fn set_fail_signing(&self, fail: bool) {
        self.fail_signing.store(fail, Ordering::SeqCst);
    }

    /// Stall every subsequent listing for `delay`, like a slow network store.
    pub fn set_listing_delay(&self, delay: Duration) {
        self.listing_delay_ms.store(as_millis(delay), Ordering::SeqCst);
    }

    /// Stall every subsequent presign for `delay`.
    pub fn set_signing_delay(&self, delay: Duration) {
        self.signing_delay_ms.store(as_millis(delay), Ordering::SeqCst);
    }
}

fn as_millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}

async fn stall(delay_ms: &AtomicU64) {
    let millis = delay_ms.load(Ordering::SeqCst);
    if millis > 0 {
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }
}

impl Default for MemoryClipStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClipStore for MemoryClipStore {
    async fn list_objects(
        &self,
        prefix: &str,
        start_after: &str,
        max_keys: usize,
    ) -> StorageResult<Vec<ClipObject>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        stall(&self.listing_delay_ms).await;
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(StorageError::ListFailed(
                "memory store configured to fail listings".to_string(),
            ));
        }

        let objects = self
            .objects
            .read()
            .map_err(|e| StorageError::BackendError(e.to_string()))?;

        let clips = objects
            .range::<str, _>((Bound::Excluded(start_after), Bound::Unbounded))
            .map(|(_, clip)| clip)
            .filter(|clip| clip.key.starts_with(prefix))
            .take(max_keys)
            .cloned()
            .collect();

        Ok(clips)
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        self.presign_calls.fetch_add(1, Ordering::SeqCst);
        stall(&self.signing_delay_ms).await;
        if self.fail_signing.load(Ordering::SeqCst) {
            return Err(StorageError::SignFailed(
                "memory store configured to fail signing".to_string(),
            ));
        }

        let key = key.trim_start_matches('/');
        if key.is_empty() {
            return Err(StorageError::InvalidKey("empty key".to_string()));
        }

        Ok(format!(
            "{}/{}?expires_in={}",
            self.base_url,
            key,
            expires_in.as_secs()
        ))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryClipStore {
        let store = MemoryClipStore::new();
        store
            .insert_keys([
                "cams/streams/2024-01-01/2024-01-01_09-55-00-front.mp4",
                "cams/streams/2024-01-01/2024-01-01_10-00-00-back.mp4",
                "cams/streams/2024-01-01/2024-01-01_10-05-00-front.mp4",
                "cams/streams/2024-01-02/2024-01-02_00-00-00-left.mp4",
                "other/streams/2024-01-01/2024-01-01_10-00-00-left.mp4",
            ])
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_list_is_prefix_scoped_and_strictly_after() {
        let store = store();
        let clips = store
            .list_objects(
                "cams/streams/2024-01-01",
                "cams/streams/2024-01-01/2024-01-01_10-00-00-back.mp4",
                100,
            )
            .await
            .unwrap();
        let keys: Vec<_> = clips.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["cams/streams/2024-01-01/2024-01-01_10-05-00-front.mp4"]
        );
        assert_eq!(store.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_list_respects_max_keys() {
        let store = store();
        let clips = store
            .list_objects("cams/streams/2024-01-01", "cams/streams/2024-01-01/", 2)
            .await
            .unwrap();
        assert_eq!(clips.len(), 2);
        assert_eq!(
            clips[0].key,
            "cams/streams/2024-01-01/2024-01-01_09-55-00-front.mp4"
        );
    }

    #[tokio::test]
    async fn test_presign_normalizes_leading_slash() {
        let store = MemoryClipStore::with_base_url("http://clips.test/");
        let url = store
            .presign_get("/placeholder.mp4", Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(url, "http://clips.test/placeholder.mp4?expires_in=5");
        assert_eq!(store.presign_calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_switches() {
        let store = store();
        store.set_fail_listing(true);
        assert!(matches!(
            store.list_objects("cams", "", 10).await,
            Err(StorageError::ListFailed(_))
        ));

        store.set_fail_signing(true);
        assert!(matches!(
            store.presign_get("a.mp4", Duration::from_secs(5)).await,
            Err(StorageError::SignFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_delay_stalls_calls() {
        let store = store();
        store.set_listing_delay(Duration::from_millis(200));

        let stalled = tokio::time::timeout(
            Duration::from_millis(20),
            store.list_objects("cams/streams/2024-01-01", "", 10),
        )
        .await;
        assert!(stalled.is_err());
        assert_eq!(store.list_calls(), 1);

        store.set_listing_delay(Duration::ZERO);
        let clips = store
            .list_objects("cams/streams/2024-01-01", "", 10)
            .await
            .unwrap();
        assert_eq!(clips.len(), 3);
    }
}
