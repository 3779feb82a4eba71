//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StartifyConfig;
use crate::db::Store;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the in-memory store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StartifyConfig,
    store: Store,
}

impl AppState {
    /// Create a new application state with an empty store.
    #[must_use]
    pub fn new(config: StartifyConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store: Store::new(),
            }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &StartifyConfig {
        &self.inner.config
    }

    /// Get a reference to the in-memory store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.inner.store
    }
}
