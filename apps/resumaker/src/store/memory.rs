use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use super::{KeyValueStorage, StorageError};

/// Process-local slots. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RwLock<HashMap<String, String>>,
    read_only: AtomicBool,
    fail_reads: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::new();
        if let Ok(mut slots) = storage.slots.write() {
            slots.insert(key.to_string(), value.to_string());
        }
        storage
    }

    /// Rejects every write while set, the way a full or disabled browser store does.
    #[cfg(test)]
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    /// Fails every read while set.
    #[cfg(test)]
    pub fn set_fail_reads(&self, fail_reads: bool) {
        self.fail_reads.store(fail_reads, Ordering::SeqCst);
    }

    /// Raw stored value, bypassing the async interface.
    #[cfg(test)]
    pub fn snapshot(&self, key: &str) -> Option<String> {
        self.slots.read().ok()?.get(key).cloned()
    }
}

fn poisoned() -> StorageError {
    StorageError::Unavailable("memory slot lock poisoned".to_string())
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(
                "memory storage reads are disabled".to_string(),
            ));
        }
        let slots = self.slots.read().map_err(|_| poisoned())?;
        Ok(slots.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(
                "memory storage is read-only".to_string(),
            ));
        }
        let mut slots = self.slots.write().map_err(|_| poisoned())?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
