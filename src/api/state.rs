//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::{Arc, Mutex};

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::store::RecordStore;

/// Shared application state.
///
/// Holds the loaded configuration and the record store. Store access is
/// serialized so each save, delete, or computation runs to completion before
/// the next one touches the records.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    store: Arc<Mutex<dyn RecordStore + Send>>,
}

impl AppState {
    /// Creates a new application state over `store`.
    pub fn new<S>(config: ConfigLoader, store: S) -> Self
    where
        S: RecordStore + Send + 'static,
    {
        Self {
            config: Arc::new(config),
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Runs `f` with exclusive access to the record store.
    pub fn with_store<T>(
        &self,
        f: impl FnOnce(&mut dyn RecordStore) -> EngineResult<T>,
    ) -> EngineResult<T> {
        let mut store = self.store.lock().map_err(|_| EngineError::Storage {
            message: "record store lock poisoned".to_string(),
        })?;
        f(&mut *store)
    }
}
