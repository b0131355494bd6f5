//! In-memory storage backend, scoped to the life of the process

use crate::{entry_size, StorageBackend, StorageResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// In-memory key/value store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<bool> {
        Ok(self.entries.write().remove(key).is_some())
    }

    fn clear(&self) -> StorageResult<()> {
        self.entries.write().clear();
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let mut keys: Vec<String> = self.entries.read().keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    fn used_bytes(&self) -> StorageResult<usize> {
        Ok(self
            .entries
            .read()
            .iter()
            .map(|(key, value)| entry_size(key, value))
            .sum())
    }

    fn len(&self) -> StorageResult<usize> {
        Ok(self.entries.read().len())
    }
}
