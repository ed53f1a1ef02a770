//! User profile and streak counters.
//!
//! [`ProfileStore`] manages the two non-collection values in the registry:
//! the profile (account info plus preference switches) and the streak
//! counters. Streak values are seed data — like achievement progress, they
//! are not recomputed from task activity.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::store::{Storage, StorageKey};

/// Account info and preference switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    /// Reminder notifications on/off.
    pub notifications: bool,
    /// Dark color scheme on/off.
    pub dark_mode: bool,
    /// Hide streaks and stats from shared views.
    pub privacy: bool,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "John Doe".into(),
            email: "john.doe@example.com".into(),
            notifications: true,
            dark_mode: false,
            privacy: false,
        }
    }
}

/// Streak and lifetime counters shown on the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakData {
    /// Days in the current streak.
    pub current_streak: u32,
    /// Longest streak ever held.
    pub longest_streak: u32,
    /// Lifetime tasks completed.
    pub tasks_done: u32,
    /// Lifetime rules created.
    pub rules_set: u32,
}

impl Default for StreakData {
    fn default() -> Self {
        Self {
            current_streak: 15,
            longest_streak: 127,
            tasks_done: 892,
            rules_set: 42,
        }
    }
}

/// State controller for profile and streak data.
pub struct ProfileStore {
    profile: UserProfile,
    streaks: StreakData,
    storage: Arc<Storage>,
}

impl ProfileStore {
    /// Load profile and streak data from storage, falling back to defaults.
    pub fn load(storage: Arc<Storage>) -> Self {
        let profile = storage
            .get::<UserProfile>(StorageKey::UserProfile)
            .unwrap_or_default();
        let streaks = storage
            .get::<StreakData>(StorageKey::StreakData)
            .unwrap_or_default();
        Self {
            profile,
            streaks,
            storage,
        }
    }

    /// The current profile.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// The current streak counters.
    pub fn streaks(&self) -> &StreakData {
        &self.streaks
    }

    /// Set the display name. An empty-after-trim name is rejected
    /// (no change, `false` returned), matching the title policy elsewhere.
    pub fn set_name(&mut self, name: &str) -> bool {
        if name.trim().is_empty() {
            tracing::debug!("name rejected: empty");
            return false;
        }
        self.profile.name = name.to_string();
        self.persist();
        true
    }

    /// Set the email address. Same empty-after-trim rejection; no format
    /// validation beyond that, matching the original.
    pub fn set_email(&mut self, email: &str) -> bool {
        if email.trim().is_empty() {
            tracing::debug!("email rejected: empty");
            return false;
        }
        self.profile.email = email.to_string();
        self.persist();
        true
    }

    /// Flip the notifications switch. Returns the new value.
    pub fn toggle_notifications(&mut self) -> bool {
        self.profile.notifications = !self.profile.notifications;
        self.persist();
        self.profile.notifications
    }

    /// Flip the dark mode switch. Returns the new value.
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.profile.dark_mode = !self.profile.dark_mode;
        self.persist();
        self.profile.dark_mode
    }

    /// Flip the privacy switch. Returns the new value.
    pub fn toggle_privacy(&mut self) -> bool {
        self.profile.privacy = !self.profile.privacy;
        self.persist();
        self.profile.privacy
    }

    fn persist(&self) {
        self.storage.set(StorageKey::UserProfile, &self.profile);
        self.storage.set(StorageKey::StreakData, &self.streaks);
    }
}

impl std::fmt::Debug for ProfileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileStore")
            .field("name", &self.profile.name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ProfileStore {
        ProfileStore::load(Arc::new(Storage::in_memory()))
    }

    #[test]
    fn defaults_when_keys_absent() {
        let store = store();
        assert_eq!(store.profile().name, "John Doe");
        assert!(store.profile().notifications);
        assert!(!store.profile().dark_mode);
        assert_eq!(store.streaks().current_streak, 15);
        assert_eq!(store.streaks().longest_streak, 127);
    }

    #[test]
    fn set_name_rejects_blank() {
        let mut store = store();
        assert!(!store.set_name("   "));
        assert_eq!(store.profile().name, "John Doe");

        assert!(store.set_name("Ada"));
        assert_eq!(store.profile().name, "Ada");
    }

    #[test]
    fn toggles_flip_and_report_new_value() {
        let mut store = store();
        assert!(!store.toggle_notifications());
        assert!(store.toggle_dark_mode());
        assert!(store.toggle_privacy());
        assert!(!store.toggle_privacy());
    }

    #[test]
    fn changes_persist_to_storage() {
        let storage = Arc::new(Storage::in_memory());
        {
            let mut store = ProfileStore::load(Arc::clone(&storage));
            store.set_name("Ada");
            store.toggle_dark_mode();
        }
        let reloaded = ProfileStore::load(storage);
        assert_eq!(reloaded.profile().name, "Ada");
        assert!(reloaded.profile().dark_mode);
    }
}
