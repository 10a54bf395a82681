//! In-memory backend
//!
//! Keeps serialized collections in a map. Counts writes per key so callers can
//! observe how often the store persisted.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{FinanceError, FinanceResult};

use super::{CollectionKey, PersistenceBackend};

#[derive(Debug, Default)]
struct MemoryState {
    values: HashMap<CollectionKey, String>,
    writes: HashMap<CollectionKey, usize>,
}

/// Backend holding collections in memory
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: RwLock<MemoryState>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, as if it had been persisted earlier
    pub fn with_value(self, key: CollectionKey, contents: impl Into<String>) -> Self {
        if let Ok(mut state) = self.state.write() {
            state.values.insert(key, contents.into());
        }
        self
    }

    /// Number of writes made to `key`
    pub fn write_count(&self, key: CollectionKey) -> usize {
        self.state
            .read()
            .map(|state| state.writes.get(&key).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Total number of writes across all keys
    pub fn total_writes(&self) -> usize {
        self.state
            .read()
            .map(|state| state.writes.values().sum())
            .unwrap_or(0)
    }

    /// Raw value currently stored under `key`
    pub fn value(&self, key: CollectionKey) -> Option<String> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.values.get(&key).cloned())
    }
}

impl PersistenceBackend for MemoryBackend {
    fn read(&self, key: CollectionKey) -> FinanceResult<Option<String>> {
        let state = self
            .state
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(state.values.get(&key).cloned())
    }

    fn write(&self, key: CollectionKey, contents: &str) -> FinanceResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        state.values.insert(key, contents.to_string());
        *state.writes.entry(key).or_insert(0) += 1;
        Ok(())
    }

    fn remove(&self, key: CollectionKey) -> FinanceResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        state.values.remove(&key);
        Ok(())
    }
}
