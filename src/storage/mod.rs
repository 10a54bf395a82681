//! Storage layer for fintrack
//!
//! The ledger persists through a small key-value contract: three keys, each
//! holding one whole collection serialized as JSON. Any backend that can get,
//! set and remove a string per key can carry a `FinanceStore`.

pub mod file_io;
pub mod json_dir;
pub mod memory;

pub use json_dir::JsonDirBackend;
pub use memory::MemoryBackend;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FinanceResult;

/// The persisted collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CollectionKey {
    Currencies,
    ExpenseLists,
    Incomes,
}

impl CollectionKey {
    pub const ALL: [CollectionKey; 3] = [Self::Currencies, Self::ExpenseLists, Self::Incomes];

    /// Key name used by backends
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Currencies => "currencies",
            Self::ExpenseLists => "expenseLists",
            Self::Incomes => "incomes",
        }
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whole-collection key-value persistence
pub trait PersistenceBackend: Send + Sync {
    /// Read the raw value stored under `key`, if any
    fn read(&self, key: CollectionKey) -> FinanceResult<Option<String>>;

    /// Overwrite the value stored under `key`
    fn write(&self, key: CollectionKey, contents: &str) -> FinanceResult<()>;

    /// Forget the value stored under `key`
    fn remove(&self, key: CollectionKey) -> FinanceResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(CollectionKey::Currencies.as_str(), "currencies");
        assert_eq!(CollectionKey::ExpenseLists.as_str(), "expenseLists");
        assert_eq!(CollectionKey::Incomes.to_string(), "incomes");
    }
}
