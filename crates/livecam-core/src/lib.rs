//! livecam core library
//!
//! Domain model, error taxonomy, configuration and the pure clip-selection
//! algorithms shared by the storage and API crates.

pub mod clips;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use clips::{
    extract_timestamp, rank_clips, select_latest_per_camera, ClipTimestamp, LatestClips,
    SelectionPolicy,
};
pub use config::{BaseConfig, ClipConfig, Config, StorageConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{CameraAngle, ClipObject, RequestedCamera};
pub use storage_types::StorageBackend;
