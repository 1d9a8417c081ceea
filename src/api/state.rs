//! Application state for the payroll engine API.

use std::sync::Arc;

use crate::config::ConfigStore;

/// Shared application state.
///
/// Holds the loaded configuration store (business configs, legacy
/// mappings and rate tables), shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    store: Arc<ConfigStore>,
}

impl AppState {
    /// Creates a new application state around a loaded store.
    pub fn new(store: ConfigStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Returns a reference to the configuration store.
    pub fn store(&self) -> &ConfigStore {
        &self.store
    }
}
