//! Configuration module
//!
//! Configuration is read once at start-up (from the process environment, after
//! loading `.env`) into an immutable `Config` that is handed to the services.

use std::collections::HashSet;
use std::env;
use std::time::Duration;

use chrono::TimeDelta;
use chrono_tz::Tz;

use crate::clips::SelectionPolicy;
use crate::constants::{
    DEFAULT_ANGLE_ORDER, DEFAULT_LOOKBACK_SECS, DEFAULT_MAX_KEYS, DEFAULT_OPERATIONAL_TIMEZONE,
    DEFAULT_PLACEHOLDER_KEY, DEFAULT_SCAN_WINDOW, DEFAULT_STORE_TIMEOUT_MS, DEFAULT_URL_TTL_SECS,
};
use crate::models::CameraAngle;
use crate::storage_types::StorageBackend;

const SERVER_PORT: u16 = 8080;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;
/// S3 caps a single ListObjectsV2 page at 1000 keys.
const MAX_KEYS_LIMIT: usize = 1000;
/// SigV4 presigned URLs are valid for at most seven days.
const MAX_URL_TTL_SECS: u64 = 7 * 24 * 60 * 60;
/// Clips are listed under a single day's prefix.
const MAX_LOOKBACK_SECS: u64 = 24 * 60 * 60;
const MAX_STORE_TIMEOUT_MS: u64 = 5 * 60 * 1000;

/// HTTP server settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub http_concurrency_limit: usize,
    pub index_html_path: String,
}

/// Object store connection settings
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub bucket: Option<String>,
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible providers (MinIO, Wasabi, ...). Path-style addressing.
    pub endpoint: Option<String>,
}

/// Clip lookup policy
#[derive(Clone, Debug)]
pub struct ClipConfig {
    /// Key prefix in front of `streams/{date}`. May be empty.
    pub base_prefix: String,
    pub timezone: Tz,
    pub lookback_secs: u64,
    pub max_keys: usize,
    pub scan_window: usize,
    pub angle_order: Vec<CameraAngle>,
    pub url_ttl_secs: u64,
    pub placeholder_key: String,
    /// Bound on each store call (listing, signing).
    pub store_timeout_ms: u64,
}

impl ClipConfig {
    pub fn selection_policy(&self) -> SelectionPolicy {
        SelectionPolicy {
            scan_window: self.scan_window,
            angle_order: self.angle_order.clone(),
        }
    }

    /// `None` when the configured lookback does not fit a `TimeDelta`.
    pub fn lookback(&self) -> Option<TimeDelta> {
        i64::try_from(self.lookback_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
    }

    pub fn url_ttl(&self) -> Duration {
        Duration::from_secs(self.url_ttl_secs)
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            base_prefix: String::new(),
            timezone: chrono_tz::Asia::Bangkok,
            lookback_secs: DEFAULT_LOOKBACK_SECS,
            max_keys: DEFAULT_MAX_KEYS,
            scan_window: DEFAULT_SCAN_WINDOW,
            angle_order: DEFAULT_ANGLE_ORDER.to_vec(),
            url_ttl_secs: DEFAULT_URL_TTL_SECS,
            placeholder_key: DEFAULT_PLACEHOLDER_KEY.to_string(),
            store_timeout_ms: DEFAULT_STORE_TIMEOUT_MS,
        }
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub storage: StorageConfig,
    pub clips: ClipConfig,
}

impl Config {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |names: &[&str]| {
            names
                .iter()
                .find_map(|name| var(name).filter(|value| !value.trim().is_empty()))
        };

        let environment =
            first(&["ENVIRONMENT", "APP_ENV"]).unwrap_or_else(|| "development".to_string());

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: var("PORT")
                .unwrap_or_else(|| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            http_concurrency_limit: var("HTTP_CONCURRENCY_LIMIT")
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT)
                .max(1),
            index_html_path: var("INDEX_HTML_PATH").unwrap_or_else(|| "index.html".to_string()),
        };

        let storage = StorageConfig {
            backend: match var("STORAGE_BACKEND") {
                Some(s) => s.parse()?,
                None => StorageBackend::S3,
            },
            bucket: first(&["S3_BUCKET_NAME", "S3_BUCKET"]),
            region: first(&["AWS_REGION", "S3_REGION"]),
            endpoint: first(&["S3_CUSTOM_ENDPOINT", "S3_ENDPOINT"]),
        };

        let timezone_name = var("OPERATIONAL_TIMEZONE")
            .unwrap_or_else(|| DEFAULT_OPERATIONAL_TIMEZONE.to_string());
        let timezone: Tz = timezone_name.trim().parse().map_err(|_| {
            anyhow::anyhow!(
                "OPERATIONAL_TIMEZONE '{}' is not a known IANA time zone",
                timezone_name
            )
        })?;

        let angle_order = match var("CLIP_ANGLE_ORDER") {
            Some(s) => parse_angle_order(&s)?,
            None => DEFAULT_ANGLE_ORDER.to_vec(),
        };

        let clips = ClipConfig {
            base_prefix: var("S3_BUCKET_PREFIX")
                .map(|s| s.trim().trim_end_matches('/').to_string())
                .unwrap_or_default(),
            timezone,
            lookback_secs: parse_or(&var, "CLIP_LOOKBACK_SECS", DEFAULT_LOOKBACK_SECS)?,
            max_keys: parse_or(&var, "CLIP_MAX_KEYS", DEFAULT_MAX_KEYS)?,
            scan_window: parse_or(&var, "CLIP_SCAN_WINDOW", DEFAULT_SCAN_WINDOW)?,
            angle_order,
            url_ttl_secs: parse_or(&var, "CLIP_URL_TTL_SECS", DEFAULT_URL_TTL_SECS)?,
            placeholder_key: var("PLACEHOLDER_KEY")
                .unwrap_or_else(|| DEFAULT_PLACEHOLDER_KEY.to_string()),
            store_timeout_ms: parse_or(&var, "CLIP_STORE_TIMEOUT_MS", DEFAULT_STORE_TIMEOUT_MS)?,
        };

        let config = Config {
            base,
            storage,
            clips,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.base.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let clips = &self.clips;
        if clips.scan_window == 0 {
            return Err(anyhow::anyhow!("CLIP_SCAN_WINDOW must be at least 1"));
        }
        if clips.max_keys == 0 || clips.max_keys > MAX_KEYS_LIMIT {
            return Err(anyhow::anyhow!(
                "CLIP_MAX_KEYS must be between 1 and {}",
                MAX_KEYS_LIMIT
            ));
        }
        if clips.url_ttl_secs == 0 || clips.url_ttl_secs > MAX_URL_TTL_SECS {
            return Err(anyhow::anyhow!(
                "CLIP_URL_TTL_SECS must be between 1 and {}",
                MAX_URL_TTL_SECS
            ));
        }
        if clips.lookback_secs == 0 || clips.lookback_secs > MAX_LOOKBACK_SECS {
            return Err(anyhow::anyhow!(
                "CLIP_LOOKBACK_SECS must be between 1 and {}",
                MAX_LOOKBACK_SECS
            ));
        }
        if clips.store_timeout_ms == 0 || clips.store_timeout_ms > MAX_STORE_TIMEOUT_MS {
            return Err(anyhow::anyhow!(
                "CLIP_STORE_TIMEOUT_MS must be between 1 and {}",
                MAX_STORE_TIMEOUT_MS
            ));
        }
        if clips.placeholder_key.trim_matches('/').is_empty() {
            return Err(anyhow::anyhow!("PLACEHOLDER_KEY cannot be empty"));
        }

        if self.storage.backend == StorageBackend::S3 {
            if self.storage.bucket.is_none() {
                return Err(anyhow::anyhow!(
                    "S3_BUCKET_NAME must be set when using S3 storage backend"
                ));
            }
            if self.storage.region.is_none() {
                return Err(anyhow::anyhow!(
                    "AWS_REGION must be set when using S3 storage backend"
                ));
            }
        }

        Ok(())
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.base.http_concurrency_limit
    }

    pub fn index_html_path(&self) -> &str {
        &self.base.index_html_path
    }
}

fn parse_or<F, T>(var: &F, name: &str, default: T) -> Result<T, anyhow::Error>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match var(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number, got '{}'", name, raw)),
        None => Ok(default),
    }
}

/// Parse a comma-separated angle order such as `front,back,left,right`.
///
/// Every angle must appear exactly once.
pub fn parse_angle_order(raw: &str) -> Result<Vec<CameraAngle>, anyhow::Error> {
    let order = raw
        .split(',')
        .map(|s| {
            s.trim()
                .parse::<CameraAngle>()
                .map_err(|e| anyhow::anyhow!("CLIP_ANGLE_ORDER: {}", e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let distinct: HashSet<_> = order.iter().collect();
    if order.len() != CameraAngle::ALL.len() || distinct.len() != order.len() {
        return Err(anyhow::anyhow!(
            "CLIP_ANGLE_ORDER must list front, back, left and right exactly once"
        ));
    }

    Ok(order)
}
