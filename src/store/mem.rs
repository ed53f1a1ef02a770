//! In-memory storage backend backed by DashMap.
//!
//! The ephemeral counterpart to [`RedbBackend`](super::durable::RedbBackend):
//! same contract, no disk. All data is lost on drop. This is also the fake
//! that substitutes for durable storage in tests.

use dashmap::DashMap;

use crate::store::{StoreBackend, StoreResult};

/// Concurrent in-memory backend using a sharded hashmap.
#[derive(Debug, Default)]
pub struct MemBackend {
    data: DashMap<String, Vec<u8>>,
}

impl MemBackend {
    /// Create an empty in-memory backend.
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the backend holds no keys.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl StoreBackend for MemBackend {
    fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.data.get(key).map(|v| v.value().clone()))
    }

    fn write(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        self.data.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        self.data.remove(key);
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        self.data.clear();
        Ok(())
    }
}
