//! Clip selection: pull the timestamp out of each key, rank newest first,
//! then pick the newest clip per camera angle.

pub mod ranking;
pub mod selection;
pub mod timestamp;

pub use ranking::rank_clips;
pub use selection::{select_latest_per_camera, LatestClips, SelectionPolicy};
pub use timestamp::{extract_timestamp, ClipTimestamp, CLIP_DATE_FORMAT, CLIP_TIMESTAMP_FORMAT};
