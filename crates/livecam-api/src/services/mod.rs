pub mod clip_resolver;

pub use clip_resolver::{ClipResolver, ClipSource, Clock, ListingWindow, ResolvedClip};
