//! Process-local key-value medium.
//!
//! Used by tests and by hosts without durable storage; contents are lost when
//! the value is dropped.

use super::{KeyValueStore, Namespace, StorageError, StorageResult};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// In-memory `KeyValueStore`. Single writer, not `Sync`.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RefCell<BTreeMap<(Namespace, String), String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys across all namespaces.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, namespace: Namespace, key: &str) -> StorageResult<Option<String>> {
        let entries = self
            .entries
            .try_borrow()
            .map_err(|_| StorageError::Busy(namespace))?;
        Ok(entries.get(&(namespace, key.to_string())).cloned())
    }

    fn set(&self, namespace: Namespace, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self
            .entries
            .try_borrow_mut()
            .map_err(|_| StorageError::Busy(namespace))?;
        entries.insert((namespace, key.to_string()), value.to_string());
        Ok(())
    }

    fn delete(&self, namespace: Namespace, key: &str) -> StorageResult<()> {
        let mut entries = self
            .entries
            .try_borrow_mut()
            .map_err(|_| StorageError::Busy(namespace))?;
        entries.remove(&(namespace, key.to_string()));
        Ok(())
    }
}
