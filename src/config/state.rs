// Application state module
// Everything a request handler needs, shared read-only across connections

use std::sync::Arc;

use super::types::Config;
use crate::store::SharedStore;
use crate::view::SharedRenderer;

/// Application state
pub struct AppState {
    pub config: Config,
    pub store: SharedStore,
    pub renderer: SharedRenderer,
}

impl AppState {
    pub fn new(config: Config, store: SharedStore, renderer: SharedRenderer) -> Self {
        Self {
            config,
            store,
            renderer,
        }
    }

    /// Access logging is fixed for the process lifetime
    pub const fn access_log(&self) -> bool {
        self.config.logging.access_log
    }
}

/// Wrapper for Arc<AppState>
pub type SharedState = Arc<AppState>;
