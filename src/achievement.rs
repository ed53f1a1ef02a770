//! Achievements: milestones unlocked by consistent habit work.
//!
//! The catalog is read-only in this system. Progress values are part of the
//! seed data and are not recomputed from task or rule activity.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::collection::{self, Collection};
use crate::record::{Record, RecordId};
use crate::seeds;
use crate::store::{Storage, StorageKey};

/// Points awarded per unlocked achievement.
pub const POINTS_PER_UNLOCK: u32 = 100;

/// A single achievement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    /// Unique identifier.
    pub id: RecordId,
    /// Short name of the milestone.
    pub title: String,
    /// What it takes to unlock.
    pub description: String,
    /// Whether the milestone has been reached.
    pub unlocked: bool,
    /// Progress toward the goal. At most `total` when well-formed.
    pub progress: u32,
    /// The goal. Always positive.
    pub total: u32,
}

impl Achievement {
    /// Progress toward the goal as a rounded whole percentage.
    pub fn progress_percent(&self) -> u32 {
        collection::percent(self.progress as usize, self.total as usize)
    }
}

impl Record for Achievement {
    fn id(&self) -> RecordId {
        self.id
    }
}

/// Derived statistics over the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementStats {
    /// Catalog size.
    pub total: usize,
    /// Number unlocked.
    pub unlocked: usize,
    /// `round(unlocked / total × 100)`; 0 for an empty catalog.
    pub completion_rate: u32,
    /// `unlocked × POINTS_PER_UNLOCK`.
    pub total_points: u32,
}

/// Read-only state controller for the achievement catalog.
pub struct AchievementCatalog {
    achievements: Collection<Achievement>,
}

impl AchievementCatalog {
    /// Load the catalog from storage, falling back to seed data.
    pub fn load(storage: Arc<Storage>) -> Self {
        let achievements = match storage.get::<Vec<Achievement>>(StorageKey::Achievements) {
            Some(achievements) => Collection::from_records(achievements),
            None => Collection::from_records(seeds::default_achievements()),
        };
        Self { achievements }
    }

    /// All achievements, in catalog order.
    pub fn achievements(&self) -> &[Achievement] {
        self.achievements.records()
    }

    /// Look up an achievement by ID.
    pub fn get(&self, id: RecordId) -> Option<&Achievement> {
        self.achievements.get(id)
    }

    /// Compute derived statistics by a full scan.
    pub fn stats(&self) -> AchievementStats {
        let total = self.achievements.len();
        let unlocked = self
            .achievements
            .records()
            .iter()
            .filter(|a| a.unlocked)
            .count();
        AchievementStats {
            total,
            unlocked,
            completion_rate: collection::percent(unlocked, total),
            total_points: unlocked as u32 * POINTS_PER_UNLOCK,
        }
    }
}

impl std::fmt::Debug for AchievementCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AchievementCatalog")
            .field("count", &self.achievements.len())
            .finish()
    }
}
