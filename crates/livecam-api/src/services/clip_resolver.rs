//! Resolves a camera angle to a signed URL for its newest clip.
//!
//! One pass per request: compute the listing window from the clock, list the
//! recent keys, rank them, pick the newest clip per angle, then sign either the
//! requested angle's clip or the placeholder. Nothing is retried or cached.

use chrono::{DateTime, Utc};
use livecam_core::clips::{ClipTimestamp, CLIP_DATE_FORMAT};
use livecam_core::constants::STREAMS_SEGMENT;
use livecam_core::{
    rank_clips, select_latest_per_camera, AppError, ClipConfig, ClipObject, RequestedCamera,
};
use livecam_storage::{ClipStore, StorageError};
use std::sync::Arc;

/// Source of "now". Swapped for a fixed instant in tests.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Prefix and start-after marker for one listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingWindow {
    /// `{base_prefix}/streams/{YYYY-MM-DD}` in the operational zone.
    pub prefix: String,
    /// `{prefix}/{YYYY-MM-DD_HH-MM-SS}` of now minus the lookback.
    pub start_after: String,
}

/// What a signed URL points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipSource {
    Clip { key: String },
    Placeholder { key: String },
}

impl ClipSource {
    pub fn key(&self) -> &str {
        match self {
            ClipSource::Clip { key } | ClipSource::Placeholder { key } => key,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ClipSource::Placeholder { .. })
    }
}

/// Signed URL for exactly one requested camera.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedClip {
    pub camera: RequestedCamera,
    pub url: String,
    pub source: ClipSource,
}

#[derive(Clone)]
pub struct ClipResolver {
    store: Arc<dyn ClipStore>,
    config: ClipConfig,
    clock: Clock,
}

impl ClipResolver {
    pub fn new(store: Arc<dyn ClipStore>, config: ClipConfig) -> Self {
        Self {
            store,
            config,
            clock: Arc::new(Utc::now),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Listing window for the given instant.
    pub fn listing_window(&self, now: DateTime<Utc>) -> Result<ListingWindow, AppError> {
        let local = now.with_timezone(&self.config.timezone);
        let current_date = local.format(CLIP_DATE_FORMAT).to_string();

        let prefix = if self.config.base_prefix.is_empty() {
            format!("{}/{}", STREAMS_SEGMENT, current_date)
        } else {
            format!(
                "{}/{}/{}",
                self.config.base_prefix, STREAMS_SEGMENT, current_date
            )
        };

        let window_start = self
            .config
            .lookback()
            .and_then(|lookback| local.checked_sub_signed(lookback))
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "lookback of {}s is out of range",
                    self.config.lookback_secs
                ))
            })?
            .naive_local();
        let start_after = format!("{}/{}", prefix, ClipTimestamp::from_naive(&window_start));

        Ok(ListingWindow {
            prefix,
            start_after,
        })
    }

    /// Resolve `camera` against the clock's current time.
    pub async fn resolve(&self, camera: RequestedCamera) -> Result<ResolvedClip, AppError> {
        self.resolve_at(camera, (self.clock)()).await
    }

    #[tracing::instrument(skip_all, fields(camera = %camera))]
    pub async fn resolve_at(
        &self,
        camera: RequestedCamera,
        now: DateTime<Utc>,
    ) -> Result<ResolvedClip, AppError> {
        let window = self.listing_window(now)?;

        let candidates = self.list_candidates(&window).await?;
        if candidates.is_empty() {
            tracing::warn!(prefix = %window.prefix, start_after = %window.start_after, "No clips in window");
            return Err(AppError::NoClipsFound {
                prefix: window.prefix,
            });
        }
        tracing::info!(
            count = candidates.len(),
            prefix = %window.prefix,
            start_after = %window.start_after,
            "Found clips"
        );

        let ranked = rank_clips(candidates)?;
        let latest = select_latest_per_camera(&ranked, &self.config.selection_policy());
        tracing::debug!(resolved_angles = latest.len(), "Selected latest clip per camera");

        let source = match camera.angle().and_then(|angle| latest.get(angle)) {
            Some(clip) => ClipSource::Clip {
                key: clip.key.clone(),
            },
            None => {
                tracing::info!("No recent clip for camera, using placeholder");
                ClipSource::Placeholder {
                    key: self.config.placeholder_key.clone(),
                }
            }
        };

        let url = self.sign(source.key()).await?;
        tracing::debug!(key = %source.key(), "Signed clip URL");

        Ok(ResolvedClip {
            camera,
            url,
            source,
        })
    }

    async fn list_candidates(&self, window: &ListingWindow) -> Result<Vec<ClipObject>, AppError> {
        let timeout = self.config.store_timeout();
        let listing =
            self.store
                .list_objects(&window.prefix, &window.start_after, self.config.max_keys);

        match tokio::time::timeout(timeout, listing).await {
            Ok(result) => result.map_err(|e| AppError::StoreUnavailable(e.to_string())),
            Err(_) => Err(AppError::StoreUnavailable(format!(
                "listing timed out after {}ms",
                timeout.as_millis()
            ))),
        }
    }

    async fn sign(&self, key: &str) -> Result<String, AppError> {
        let timeout = self.config.store_timeout();
        let presign = self.store.presign_get(key, self.config.url_ttl());

        let message = match tokio::time::timeout(timeout, presign).await {
            Ok(Ok(url)) => return Ok(url),
            Ok(Err(StorageError::SignFailed(message))) => message,
            Ok(Err(other)) => other.to_string(),
            Err(_) => format!("signing timed out after {}ms", timeout.as_millis()),
        };

        Err(AppError::SigningFailed {
            key: key.to_string(),
            message,
        })
    }
}
