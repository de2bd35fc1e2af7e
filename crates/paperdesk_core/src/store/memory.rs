//! Process-local collection store.

use super::{CollectionStore, StorageError, StoreResult};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// In-memory slot map with an optional per-slot size quota.
///
/// Not durable across restarts; used for tests and headless sessions.
#[derive(Debug, Default)]
pub struct MemoryCollectionStore {
    slots: RefCell<BTreeMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryCollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects any single write whose payload exceeds `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            slots: RefCell::default(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Returns sorted slot names.
    pub fn slot_names(&self) -> Vec<String> {
        self.slots.borrow().keys().cloned().collect()
    }
}

impl CollectionStore for MemoryCollectionStore {
    fn read_slot(&self, name: &str) -> StoreResult<Option<String>> {
        Ok(self.slots.borrow().get(name).cloned())
    }

    fn write_slot(&self, name: &str, payload: &str) -> StoreResult<()> {
        if let Some(limit) = self.quota_bytes {
            if payload.len() > limit {
                return Err(StorageError::QuotaExceeded {
                    collection: name.to_string(),
                    limit_bytes: limit,
                    requested_bytes: payload.len(),
                });
            }
        }
        self.slots
            .borrow_mut()
            .insert(name.to_string(), payload.to_string());
        Ok(())
    }

    fn remove_slot(&self, name: &str) -> StoreResult<bool> {
        Ok(self.slots.borrow_mut().remove(name).is_some())
    }
}
