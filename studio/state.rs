use std::sync::Arc;

use crate::config::StudioConfig;

/// Read-only state shared by all worker threads.
///
/// Nothing here is mutated after startup: every request decodes, clusters and
/// encodes its own image, so no lock is needed.
pub struct StudioState {
    pub config: StudioConfig,
}

impl StudioState {
    pub fn new(config: StudioConfig) -> Self {
        StudioState { config }
    }
}

/// Shared state type, an `Arc<StudioState>` passed to every handler.
pub type SharedState = Arc<StudioState>;
