//! Namespaced key-value persistence for modi.
//!
//! Two pieces live here:
//!
//! - [`StoreBackend`] — the seam over the underlying key-value primitive,
//!   with [`MemBackend`](mem::MemBackend) (ephemeral, test fake) and
//!   [`RedbBackend`](durable::RedbBackend) (transactional, on disk)
//!   implementations
//! - [`Storage`] — the typed adapter the rest of the crate talks to:
//!   JSON-serialized values under the closed [`StorageKey`] registry,
//!   with fail-soft error handling
//!
//! The adapter never surfaces a storage fault to its caller. Reads that fail
//! (backend error, corrupt payload) log a diagnostic and return `None`;
//! writes that fail log and return. Callers treat every write as best-effort.

pub mod durable;
pub mod mem;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;

/// Result type for backend operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// The closed registry of persisted keys.
///
/// Every durable value in the system lives under exactly one of these keys.
/// The string forms are the stable wire names; changing one orphans the data
/// stored under the old name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// `Vec<Task>` — the daily task list.
    Tasks,
    /// `Vec<Rule>` — personal rules.
    Rules,
    /// `Vec<Achievement>` — the achievement catalog.
    Achievements,
    /// `UserProfile` — account info and preference switches.
    UserProfile,
    /// `StreakData` — streak and lifetime counters.
    StreakData,
}

impl StorageKey {
    /// All registry keys, in a fixed order.
    pub const ALL: [StorageKey; 5] = [
        StorageKey::Tasks,
        StorageKey::Rules,
        StorageKey::Achievements,
        StorageKey::UserProfile,
        StorageKey::StreakData,
    ];

    /// The stable wire name this key's value is stored under.
    pub fn as_str(self) -> &'static str {
        match self {
            StorageKey::Tasks => "modi_tasks",
            StorageKey::Rules => "modi_rules",
            StorageKey::Achievements => "modi_achievements",
            StorageKey::UserProfile => "modi_user_profile",
            StorageKey::StreakData => "modi_streak_data",
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The underlying key-value primitive the adapter wraps.
///
/// Implementations store opaque byte payloads under string keys. Writes
/// commit before returning, so two back-to-back writes to the same key land
/// in order.
pub trait StoreBackend: Send + Sync {
    /// Read the payload for `key`. `Ok(None)` if the key was never written.
    fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Insert or replace the payload for `key`.
    fn write(&self, key: &str, value: &[u8]) -> StoreResult<()>;

    /// Delete `key`. Deleting an absent key is not an error.
    fn delete(&self, key: &str) -> StoreResult<()>;

    /// Delete every key.
    fn clear(&self) -> StoreResult<()>;
}

/// Fail-soft typed persistence adapter.
///
/// Values are serialized to JSON text and stored under a [`StorageKey`].
/// All four operations absorb backend faults: they log via `tracing` and
/// degrade to `None` / no-op instead of returning errors.
pub struct Storage {
    backend: Box<dyn StoreBackend>,
}

impl Storage {
    /// Ephemeral storage backed by an in-memory map. Nothing survives drop.
    pub fn in_memory() -> Self {
        Self {
            backend: Box::new(mem::MemBackend::new()),
        }
    }

    /// Durable storage backed by redb in `data_dir`.
    pub fn open(data_dir: &std::path::Path) -> StoreResult<Self> {
        let backend = durable::RedbBackend::open(data_dir)?;
        Ok(Self {
            backend: Box::new(backend),
        })
    }

    /// Wrap an explicit backend. Used to substitute fakes in tests.
    pub fn with_backend(backend: Box<dyn StoreBackend>) -> Self {
        Self { backend }
    }

    /// Read and deserialize the value stored under `key`.
    ///
    /// Returns `None` if the key was never written, if the backend read
    /// fails, or if the payload does not deserialize to `T`. The latter two
    /// cases log a diagnostic; none of them propagate.
    pub fn get<T: DeserializeOwned>(&self, key: StorageKey) -> Option<T> {
        let bytes = match self.backend.read(key.as_str()) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = %key, "storage read failed: {e}");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key = %key, "stored payload did not deserialize: {e}");
                None
            }
        }
    }

    /// Serialize `value` to JSON and store it under `key`.
    ///
    /// Best-effort: serialization or write failure is logged and swallowed.
    /// The write has committed by the time this returns.
    pub fn set<T: Serialize>(&self, key: StorageKey, value: &T) {
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(key = %key, "value did not serialize: {e}");
                return;
            }
        };
        if let Err(e) = self.backend.write(key.as_str(), &bytes) {
            tracing::warn!(key = %key, "storage write failed: {e}");
        }
    }

    /// Delete the value stored under `key`, if any.
    pub fn remove(&self, key: StorageKey) {
        if let Err(e) = self.backend.delete(key.as_str()) {
            tracing::warn!(key = %key, "storage delete failed: {e}");
        }
    }

    /// Delete every registry key.
    pub fn clear(&self) {
        if let Err(e) = self.backend.clear() {
            tracing::warn!("storage clear failed: {e}");
        }
    }

    /// The wrapped backend. Exposed for tests that need to bypass the
    /// typed layer (e.g. planting a corrupt payload).
    pub fn backend(&self) -> &dyn StoreBackend {
        &*self.backend
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish()
    }
}
