//! Tracker facade: top-level API for the modi system.
//!
//! The `Tracker` owns the storage adapter and all entity state controllers
//! and provides the public interface the CLI (or any other frontend)
//! drives.

use std::path::PathBuf;
use std::sync::Arc;

use crate::achievement::AchievementCatalog;
use crate::error::{ModiResult, TrackerError};
use crate::profile::ProfileStore;
use crate::rule::RuleBook;
use crate::store::Storage;
use crate::task::TaskBoard;

/// Configuration for the modi tracker.
#[derive(Debug, Clone, Default)]
pub struct TrackerConfig {
    /// Data directory for persistence. `None` for memory-only mode.
    pub data_dir: Option<PathBuf>,
}

/// The modi habit tracker.
///
/// Owns the persistence adapter and the four state controllers. All
/// controllers share one [`Storage`] handle, so a test can substitute an
/// in-memory backend for the whole system at once.
pub struct Tracker {
    config: TrackerConfig,
    storage: Arc<Storage>,
    tasks: TaskBoard,
    rules: RuleBook,
    achievements: AchievementCatalog,
    profile: ProfileStore,
}

impl Tracker {
    /// Create a new tracker with the given configuration.
    ///
    /// With a data directory, collections load from durable storage (seed
    /// data when a key was never written); without one, everything lives
    /// in memory and dies with the value.
    pub fn new(config: TrackerConfig) -> ModiResult<Self> {
        let storage = match &config.data_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir).map_err(|_| TrackerError::DataDir {
                    path: dir.display().to_string(),
                })?;
                Storage::open(dir)?
            }
            None => Storage::in_memory(),
        };
        let storage = Arc::new(storage);

        tracing::info!(
            persistent = config.data_dir.is_some(),
            "initializing modi tracker"
        );

        Ok(Self {
            tasks: TaskBoard::load(Arc::clone(&storage)),
            rules: RuleBook::load(Arc::clone(&storage)),
            achievements: AchievementCatalog::load(Arc::clone(&storage)),
            profile: ProfileStore::load(Arc::clone(&storage)),
            config,
            storage,
        })
    }

    /// The task controller.
    pub fn tasks(&self) -> &TaskBoard {
        &self.tasks
    }

    /// The task controller, mutable.
    pub fn tasks_mut(&mut self) -> &mut TaskBoard {
        &mut self.tasks
    }

    /// The rule controller.
    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    /// The rule controller, mutable.
    pub fn rules_mut(&mut self) -> &mut RuleBook {
        &mut self.rules
    }

    /// The achievement catalog.
    pub fn achievements(&self) -> &AchievementCatalog {
        &self.achievements
    }

    /// The profile controller.
    pub fn profile(&self) -> &ProfileStore {
        &self.profile
    }

    /// The profile controller, mutable.
    pub fn profile_mut(&mut self) -> &mut ProfileStore {
        &mut self.profile
    }

    /// The tracker configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Wipe all persisted state and reload every controller from seed data.
    pub fn reset(&mut self) {
        self.storage.clear();
        self.tasks = TaskBoard::load(Arc::clone(&self.storage));
        self.rules = RuleBook::load(Arc::clone(&self.storage));
        self.achievements = AchievementCatalog::load(Arc::clone(&self.storage));
        self.profile = ProfileStore::load(Arc::clone(&self.storage));
    }

    /// Summary of the tracker state (counts, rates, points).
    pub fn info(&self) -> TrackerInfo {
        let task_stats = self.tasks.stats();
        let rule_stats = self.rules.stats();
        let achievement_stats = self.achievements.stats();
        TrackerInfo {
            task_count: task_stats.total,
            tasks_completed: task_stats.completed,
            completion_rate: task_stats.completion_rate,
            rule_count: rule_stats.total,
            rules_active: rule_stats.active,
            achievement_count: achievement_stats.total,
            achievements_unlocked: achievement_stats.unlocked,
            total_points: achievement_stats.total_points,
            persistent: self.config.data_dir.is_some(),
        }
    }
}

impl std::fmt::Debug for Tracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracker")
            .field("config", &self.config)
            .field("tasks", &self.tasks)
            .field("rules", &self.rules)
            .finish()
    }
}

/// Summary information about the tracker state.
#[derive(Debug, Clone)]
pub struct TrackerInfo {
    pub task_count: usize,
    pub tasks_completed: usize,
    pub completion_rate: u32,
    pub rule_count: usize,
    pub rules_active: usize,
    pub achievement_count: usize,
    pub achievements_unlocked: usize,
    pub total_points: u32,
    pub persistent: bool,
}

impl std::fmt::Display for TrackerInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "modi tracker info")?;
        writeln!(
            f,
            "  tasks:        {} ({} done, {}%)",
            self.task_count, self.tasks_completed, self.completion_rate
        )?;
        writeln!(
            f,
            "  rules:        {} ({} active)",
            self.rule_count, self.rules_active
        )?;
        writeln!(
            f,
            "  achievements: {}/{} unlocked",
            self.achievements_unlocked, self.achievement_count
        )?;
        writeln!(f, "  points:       {}", self.total_points)?;
        writeln!(f, "  persistent:   {}", self.persistent)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{Category, RuleDraft};

    fn memory_tracker() -> Tracker {
        Tracker::new(TrackerConfig::default()).unwrap()
    }

    #[test]
    fn memory_tracker_loads_all_seeds() {
        let tracker = memory_tracker();
        let info = tracker.info();
        assert_eq!(info.task_count, 3);
        assert_eq!(info.rule_count, 3);
        assert_eq!(info.achievement_count, 6);
        assert!(!info.persistent);
    }

    #[test]
    fn info_reflects_mutations() {
        let mut tracker = memory_tracker();
        tracker.tasks_mut().add("Journal").unwrap();
        tracker.rules_mut().add(RuleDraft {
            title: "Lights out by midnight".into(),
            description: String::new(),
            category: Category::Health,
        });

        let info = tracker.info();
        assert_eq!(info.task_count, 4);
        assert_eq!(info.rule_count, 4);
        assert_eq!(info.total_points, 200);
    }

    #[test]
    fn reset_returns_to_seed_state() {
        let mut tracker = memory_tracker();
        tracker.tasks_mut().add("Journal").unwrap();
        let id = tracker.rules().rules()[0].id;
        tracker.rules_mut().delete(id);

        tracker.reset();
        let info = tracker.info();
        assert_eq!(info.task_count, 3);
        assert_eq!(info.rule_count, 3);
    }

    #[test]
    fn tracker_with_persistence() {
        let dir = tempfile::TempDir::new().unwrap();
        let tracker = Tracker::new(TrackerConfig {
            data_dir: Some(dir.path().to_path_buf()),
        })
        .unwrap();
        assert!(tracker.info().persistent);
    }

    #[test]
    fn info_display_renders() {
        let rendered = memory_tracker().info().to_string();
        assert!(rendered.contains("tasks:"));
        assert!(rendered.contains("achievements: 2/6 unlocked"));
    }
}
