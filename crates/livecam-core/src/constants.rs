//! Policy defaults. Each can be overridden through `Config`.

use crate::models::CameraAngle;

/// How many ranked clips the selector inspects.
pub const DEFAULT_SCAN_WINDOW: usize = 8;

/// Order in which a key is tested against the camera angles.
pub const DEFAULT_ANGLE_ORDER: [CameraAngle; 4] = CameraAngle::ALL;

/// Upper bound on objects requested per listing.
pub const DEFAULT_MAX_KEYS: usize = 100;

/// How far back the listing window reaches.
pub const DEFAULT_LOOKBACK_SECS: u64 = 10 * 60;

/// Validity of a signed clip URL. The URL is consumed by the redirect right away.
pub const DEFAULT_URL_TTL_SECS: u64 = 5;

/// Object served when the requested angle has no recent clip.
pub const DEFAULT_PLACEHOLDER_KEY: &str = "/placeholder.mp4";

/// Zone used for the date prefix and the lookback window.
pub const DEFAULT_OPERATIONAL_TIMEZONE: &str = "Asia/Bangkok";

/// Path segment between the base prefix and the date directory.
pub const STREAMS_SEGMENT: &str = "streams";

/// Bound on a single store call.
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 10_000;
