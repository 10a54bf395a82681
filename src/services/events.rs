//! Change notifications
//!
//! Subscribers are called after every successful mutation, once the affected
//! collection has been persisted and its lock released.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use serde::Serialize;
use tracing::warn;

use crate::storage::CollectionKey;

/// What happened to the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
    Reset,
}

/// A single change notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreEvent {
    pub collection: CollectionKey,
    pub kind: ChangeKind,
    /// Full id of the entity touched; `None` for resets
    pub id: Option<String>,
}

impl StoreEvent {
    pub fn new(collection: CollectionKey, kind: ChangeKind, id: impl ToString) -> Self {
        Self {
            collection,
            kind,
            id: Some(id.to_string()),
        }
    }

    pub fn reset(collection: CollectionKey) -> Self {
        Self {
            collection,
            kind: ChangeKind::Reset,
            id: None,
        }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&StoreEvent) + Send + Sync>;

/// Registered listeners
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: AtomicU64,
    entries: RwLock<Vec<(SubscriptionId, Listener)>>,
}

impl Listeners {
    pub(crate) fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        match self.entries.write() {
            Ok(mut entries) => entries.push((id, Arc::new(listener))),
            Err(e) => warn!(error = %e, "Listener registry poisoned, subscription dropped"),
        }
        id
    }

    pub(crate) fn unsubscribe(&self, id: SubscriptionId) -> bool {
        match self.entries.write() {
            Ok(mut entries) => {
                let before = entries.len();
                entries.retain(|(entry_id, _)| *entry_id != id);
                entries.len() != before
            }
            Err(_) => false,
        }
    }

    /// Call every listener; the registry lock is not held during callbacks
    pub(crate) fn notify(&self, event: &StoreEvent) {
        let snapshot: Vec<Listener> = match self.entries.read() {
            Ok(entries) => entries.iter().map(|(_, l)| Arc::clone(l)).collect(),
            Err(_) => return,
        };
        for listener in snapshot {
            (*listener)(event);
        }
    }

    pub(crate) fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }
}
