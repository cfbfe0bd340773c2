//! livecam storage library
//!
//! Object store access needed to serve clips: a listing of recent keys and
//! short-lived signed GET URLs. Backends implement the [`ClipStore`] trait.
//!
//! # Key layout
//!
//! Clips live under `{base_prefix}/streams/{YYYY-MM-DD}/` and their file names
//! start with a `YYYY-MM-DD_HH-MM-SS` timestamp followed by the camera angle,
//! so a plain lexicographic listing is also a chronological one.

pub mod factory;
#[cfg(feature = "storage-memory")]
pub mod memory;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use livecam_core::StorageBackend;
#[cfg(feature = "storage-memory")]
pub use memory::MemoryClipStore;
#[cfg(feature = "storage-s3")]
pub use s3::S3ClipStore;
pub use traits::{ClipStore, StorageError, StorageResult};
