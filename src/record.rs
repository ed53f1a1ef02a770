//! Record identity for entity collections.
//!
//! Every task, rule, and achievement is identified by a [`RecordId`]. Fresh
//! IDs come from an [`IdAllocator`] — a monotonic counter, so two records
//! created back-to-back can never collide, and a collection reloaded from
//! storage resumes allocation past its highest persisted ID.

use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::{ModiResult, TrackerError};

/// Unique, niche-optimized identifier for a record within one collection.
///
/// Uses `NonZeroU64` so that `Option<RecordId>` is the same size as `RecordId`
/// (the niche optimization lets the compiler use 0 as the `None` discriminant).
/// Serializes as a plain JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct RecordId(NonZeroU64);

impl RecordId {
    /// Create a `RecordId` from a raw `u64`.
    ///
    /// Returns `None` if `raw` is zero.
    pub fn new(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(RecordId)
    }

    /// Get the underlying `u64` value.
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A uniquely identified record in an entity collection.
pub trait Record {
    /// This record's identifier.
    fn id(&self) -> RecordId;
}

/// Thread-safe record ID allocator.
///
/// Produces monotonically increasing IDs starting from 1.
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    /// Create a new allocator that starts from ID 1.
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Create an allocator that resumes from a given ID.
    ///
    /// Used when a collection has been loaded from storage: pass
    /// `max persisted ID + 1` so fresh IDs never collide with loaded ones.
    pub fn starting_from(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start.max(1)),
        }
    }

    /// Allocate the next record ID.
    ///
    /// Returns an error only if the ID space is exhausted (after 2^64 - 1
    /// allocations).
    pub fn next_id(&self) -> ModiResult<RecordId> {
        let raw = self.next.fetch_add(1, Ordering::Relaxed);
        RecordId::new(raw).ok_or_else(|| TrackerError::IdsExhausted.into())
    }

    /// Return the next ID that *would* be allocated, without consuming it.
    pub fn peek_next(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
