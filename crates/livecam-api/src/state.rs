//! Application state shared by the handlers.

use crate::services::ClipResolver;
use livecam_core::Config;
use livecam_storage::ClipStore;
use std::sync::Arc;

/// Immutable per-process state. Handlers receive it as `State<Arc<AppState>>`.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub resolver: ClipResolver,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn ClipStore>) -> Self {
        let resolver = ClipResolver::new(store, config.clips.clone());
        Self { config, resolver }
    }

    /// Replace the resolver, e.g. with one on a fixed clock.
    pub fn with_resolver(mut self, resolver: ClipResolver) -> Self {
        self.resolver = resolver;
        self
    }
}
