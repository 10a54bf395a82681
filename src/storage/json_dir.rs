//! JSON file backend
//!
//! Stores each collection in `<dir>/<key>.json`.

use std::path::PathBuf;

use crate::error::FinanceResult;

use super::file_io::{read_optional, remove_if_exists, write_atomic};
use super::{CollectionKey, PersistenceBackend};

/// Backend writing one JSON file per collection key
#[derive(Debug, Clone)]
pub struct JsonDirBackend {
    dir: PathBuf,
}

impl JsonDirBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: CollectionKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }
}

impl PersistenceBackend for JsonDirBackend {
    fn read(&self, key: CollectionKey) -> FinanceResult<Option<String>> {
        read_optional(self.path_for(key))
    }

    fn write(&self, key: CollectionKey, contents: &str) -> FinanceResult<()> {
        write_atomic(self.path_for(key), contents)
    }

    fn remove(&self, key: CollectionKey) -> FinanceResult<()> {
        remove_if_exists(self.path_for(key))
    }
}
