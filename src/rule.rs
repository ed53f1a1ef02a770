//! Personal rules: behavioral boundaries the user sets for themselves.
//!
//! [`RuleBook`] owns the rule list. Rules carry the full CRUD surface:
//! they can be added, edited wholesale via a [`RuleDraft`], toggled
//! on/off, and deleted.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::collection::Collection;
use crate::record::{IdAllocator, Record, RecordId};
use crate::seeds;
use crate::store::{Storage, StorageKey};

/// The fixed set of rule categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Discipline,
    Productivity,
    Health,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Discipline => write!(f, "discipline"),
            Category::Productivity => write!(f, "productivity"),
            Category::Health => write!(f, "health"),
        }
    }
}

/// A personal rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Unique identifier.
    pub id: RecordId,
    /// The rule itself. Non-empty (enforced at creation and edit).
    pub title: String,
    /// Why the rule exists. May be empty.
    pub description: String,
    /// Which area of life the rule belongs to.
    pub category: Category,
    /// Whether the rule is currently in force.
    pub enabled: bool,
}

impl Record for Rule {
    fn id(&self) -> RecordId {
        self.id
    }
}

/// The editable fields of a rule, as one unit.
///
/// Create and edit share this shape because the original form replaces
/// title, description, and category together on save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDraft {
    pub title: String,
    pub description: String,
    pub category: Category,
}

/// Derived statistics over the rule list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleStats {
    /// Total number of rules.
    pub total: usize,
    /// Number currently enabled.
    pub active: usize,
}

/// State controller for the rule list.
pub struct RuleBook {
    rules: Collection<Rule>,
    ids: IdAllocator,
    storage: Arc<Storage>,
}

impl RuleBook {
    /// Load the rule list from storage, falling back to seed data.
    pub fn load(storage: Arc<Storage>) -> Self {
        let rules = match storage.get::<Vec<Rule>>(StorageKey::Rules) {
            Some(rules) => Collection::from_records(rules),
            None => Collection::from_records(seeds::default_rules()),
        };
        let ids = IdAllocator::starting_from(rules.max_id() + 1);
        Self {
            rules,
            ids,
            storage,
        }
    }

    /// All rules, in insertion order.
    pub fn rules(&self) -> &[Rule] {
        self.rules.records()
    }

    /// Look up a rule by ID.
    pub fn get(&self, id: RecordId) -> Option<&Rule> {
        self.rules.get(id)
    }

    /// Flip a rule's enabled flag.
    ///
    /// Returns whether a rule was toggled; an absent ID is a silent no-op.
    pub fn toggle(&mut self, id: RecordId) -> bool {
        let changed = self.rules.modify(id, |r| r.enabled = !r.enabled);
        if changed {
            self.persist();
        }
        changed
    }

    /// Append a new rule with a fresh ID, enabled.
    ///
    /// A title that is empty after trimming is rejected: no state change,
    /// `None` returned.
    pub fn add(&mut self, draft: RuleDraft) -> Option<RecordId> {
        if draft.title.trim().is_empty() {
            tracing::debug!("rule rejected: empty title");
            return None;
        }
        let id = match self.ids.next_id() {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("rule rejected: {e}");
                return None;
            }
        };
        self.rules.push(Rule {
            id,
            title: draft.title,
            description: draft.description,
            category: draft.category,
            enabled: true,
        });
        self.persist();
        Some(id)
    }

    /// Replace a rule's editable fields wholesale; identity and enabled
    /// state are preserved.
    ///
    /// The same validation as `add` applies (the original form validates
    /// once for both paths): an empty-after-trim title is a no-op, as is
    /// an absent ID. Returns whether the rule changed.
    pub fn update(&mut self, id: RecordId, draft: RuleDraft) -> bool {
        if draft.title.trim().is_empty() {
            tracing::debug!(rule = %id, "edit rejected: empty title");
            return false;
        }
        let changed = self.rules.modify(id, |r| {
            r.title = draft.title;
            r.description = draft.description;
            r.category = draft.category;
        });
        if changed {
            self.persist();
        }
        changed
    }

    /// Remove a rule. Absent IDs are a no-op, so deleting twice is
    /// idempotent. Returns whether a rule was removed.
    pub fn delete(&mut self, id: RecordId) -> bool {
        let removed = self.rules.remove(id);
        if removed {
            self.persist();
        }
        removed
    }

    /// Compute derived statistics by a full scan.
    pub fn stats(&self) -> RuleStats {
        RuleStats {
            total: self.rules.len(),
            active: self.rules.records().iter().filter(|r| r.enabled).count(),
        }
    }

    fn persist(&self) {
        self.storage.set(StorageKey::Rules, &self.rules.records());
    }
}

impl std::fmt::Debug for RuleBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleBook")
            .field("count", &self.rules.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> RuleBook {
        RuleBook::load(Arc::new(Storage::in_memory()))
    }

    fn draft(title: &str, description: &str, category: Category) -> RuleDraft {
        RuleDraft {
            title: title.into(),
            description: description.into(),
            category,
        }
    }

    #[test]
    fn loads_seed_rules_when_key_absent() {
        let book = book();
        assert_eq!(book.rules().len(), 3);
    }

    #[test]
    fn add_to_seed_set_gives_four_enabled_rule() {
        let mut book = book();
        let id = book
            .add(draft("Sleep by 11pm", "", Category::Health))
            .unwrap();

        assert_eq!(book.rules().len(), 4);
        let rule = book.get(id).unwrap();
        assert!(rule.enabled);
        assert_eq!(rule.category, Category::Health);
        assert_eq!(rule.description, "");
    }

    #[test]
    fn add_rejects_blank_titles() {
        let mut book = book();
        let before = book.rules().to_vec();
        assert!(book.add(draft("  ", "desc", Category::Discipline)).is_none());
        assert_eq!(book.rules(), &before[..]);
    }

    #[test]
    fn update_replaces_fields_and_keeps_identity() {
        let mut book = book();
        let id = book.rules()[0].id;
        let enabled = book.rules()[0].enabled;

        assert!(book.update(id, draft("Phone out of the bedroom", "Charge it in the hall", Category::Discipline)));
        let rule = book.get(id).unwrap();
        assert_eq!(rule.id, id);
        assert_eq!(rule.title, "Phone out of the bedroom");
        assert_eq!(rule.description, "Charge it in the hall");
        assert_eq!(rule.category, Category::Discipline);
        assert_eq!(rule.enabled, enabled);
    }

    #[test]
    fn update_rejects_blank_title_and_absent_id() {
        let mut book = book();
        let id = book.rules()[0].id;
        let before = book.rules().to_vec();

        assert!(!book.update(id, draft("", "x", Category::Health)));
        assert!(!book.update(
            RecordId::new(999).unwrap(),
            draft("valid", "", Category::Health)
        ));
        assert_eq!(book.rules(), &before[..]);
    }

    #[test]
    fn delete_is_idempotent() {
        let mut book = book();
        let id = book.rules()[0].id;

        assert!(book.delete(id));
        let after_first = book.rules().to_vec();
        assert!(!book.delete(id));
        assert_eq!(book.rules(), &after_first[..]);
        assert_eq!(book.rules().len(), 2);
    }

    #[test]
    fn toggle_twice_restores_original_state() {
        let mut book = book();
        let id = book.rules()[0].id;
        let original = book.get(id).unwrap().enabled;

        assert!(book.toggle(id));
        assert!(book.toggle(id));
        assert_eq!(book.get(id).unwrap().enabled, original);
    }

    #[test]
    fn stats_count_active_rules() {
        // Seed set: 3 rules, 2 enabled.
        let book = book();
        let stats = book.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.active, 2);
    }

    #[test]
    fn category_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Category::Health).unwrap(),
            "\"health\""
        );
        let back: Category = serde_json::from_str("\"productivity\"").unwrap();
        assert_eq!(back, Category::Productivity);
    }

    #[test]
    fn mutations_persist_to_storage() {
        let storage = Arc::new(Storage::in_memory());
        let mut book = RuleBook::load(Arc::clone(&storage));
        let id = book.rules()[0].id;
        book.delete(id);

        let stored: Vec<Rule> = storage.get(StorageKey::Rules).unwrap();
        assert_eq!(stored.len(), 2);
        assert!(stored.iter().all(|r| r.id != id));
    }
}
