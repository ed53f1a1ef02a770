//! End-to-end integration tests for the modi tracker.
//!
//! These tests drive the facade the way a frontend would: seed state,
//! CRUD operations on every collection, and the derived statistics that
//! recompute on each read.

use modi::record::RecordId;
use modi::rule::{Category, RuleDraft};
use modi::tracker::{Tracker, TrackerConfig};

fn memory_tracker() -> Tracker {
    Tracker::new(TrackerConfig::default()).unwrap()
}

fn draft(title: &str, description: &str, category: Category) -> RuleDraft {
    RuleDraft {
        title: title.into(),
        description: description.into(),
        category,
    }
}

#[test]
fn seed_state_and_derived_stats() {
    let tracker = memory_tracker();

    // 3 tasks, 1 complete → 33%.
    let tasks = tracker.tasks().stats();
    assert_eq!(tasks.total, 3);
    assert_eq!(tasks.completed, 1);
    assert_eq!(tasks.completion_rate, 33);

    // 3 rules, 2 active.
    let rules = tracker.rules().stats();
    assert_eq!(rules.total, 3);
    assert_eq!(rules.active, 2);

    // 6 achievements, 2 unlocked → 33%, 200 points.
    let achievements = tracker.achievements().stats();
    assert_eq!(achievements.total, 6);
    assert_eq!(achievements.unlocked, 2);
    assert_eq!(achievements.completion_rate, 33);
    assert_eq!(achievements.total_points, 200);
}

#[test]
fn add_and_complete_a_task() {
    let mut tracker = memory_tracker();

    let id = tracker.tasks_mut().add("Write a journal entry").unwrap();
    let stats = tracker.tasks().stats();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.completion_rate, 25);

    assert!(tracker.tasks_mut().toggle(id));
    let stats = tracker.tasks().stats();
    assert_eq!(stats.completed, 2);
    assert_eq!(stats.completion_rate, 50);
}

#[test]
fn new_task_ids_are_fresh() {
    let mut tracker = memory_tracker();
    let existing: Vec<RecordId> = tracker.tasks().tasks().iter().map(|t| t.id).collect();

    let id = tracker.tasks_mut().add("Stretch").unwrap();
    assert!(!existing.contains(&id));
}

#[test]
fn rule_lifecycle() {
    let mut tracker = memory_tracker();

    // Create.
    let id = tracker
        .rules_mut()
        .add(draft("Sleep by 11pm", "", Category::Health))
        .unwrap();
    assert_eq!(tracker.rules().rules().len(), 4);
    assert!(tracker.rules().get(id).unwrap().enabled);

    // Edit wholesale.
    assert!(tracker.rules_mut().update(
        id,
        draft(
            "Sleep by 10:30pm",
            "Wind down earlier on weeknights",
            Category::Discipline
        )
    ));
    let rule = tracker.rules().get(id).unwrap();
    assert_eq!(rule.title, "Sleep by 10:30pm");
    assert_eq!(rule.category, Category::Discipline);

    // Toggle off and back on.
    assert!(tracker.rules_mut().toggle(id));
    assert!(!tracker.rules().get(id).unwrap().enabled);
    assert!(tracker.rules_mut().toggle(id));
    assert!(tracker.rules().get(id).unwrap().enabled);

    // Delete, then delete again: idempotent.
    assert!(tracker.rules_mut().delete(id));
    assert!(!tracker.rules_mut().delete(id));
    assert_eq!(tracker.rules().rules().len(), 3);
}

#[test]
fn blank_titles_are_silently_absorbed() {
    let mut tracker = memory_tracker();
    let tasks_before = tracker.tasks().tasks().to_vec();
    let rules_before = tracker.rules().rules().to_vec();

    assert!(tracker.tasks_mut().add("").is_none());
    assert!(tracker.tasks_mut().add(" \t ").is_none());
    assert!(
        tracker
            .rules_mut()
            .add(draft("   ", "desc", Category::Health))
            .is_none()
    );

    assert_eq!(tracker.tasks().tasks(), &tasks_before[..]);
    assert_eq!(tracker.rules().rules(), &rules_before[..]);
}

#[test]
fn operations_on_absent_ids_are_noops() {
    let mut tracker = memory_tracker();
    let ghost = RecordId::new(10_000).unwrap();
    let tasks_before = tracker.tasks().tasks().to_vec();
    let rules_before = tracker.rules().rules().to_vec();

    assert!(!tracker.tasks_mut().toggle(ghost));
    assert!(!tracker.rules_mut().toggle(ghost));
    assert!(!tracker.rules_mut().delete(ghost));
    assert!(
        !tracker
            .rules_mut()
            .update(ghost, draft("valid", "", Category::Health))
    );

    assert_eq!(tracker.tasks().tasks(), &tasks_before[..]);
    assert_eq!(tracker.rules().rules(), &rules_before[..]);
}

#[test]
fn achievement_catalog_is_static() {
    let tracker = memory_tracker();
    let unlocked: Vec<&str> = tracker
        .achievements()
        .achievements()
        .iter()
        .filter(|a| a.unlocked)
        .map(|a| a.title.as_str())
        .collect();
    assert_eq!(unlocked, vec!["First Steps", "Week Warrior"]);
}

#[test]
fn export_shapes_are_stable() {
    let tracker = memory_tracker();

    let tasks = serde_json::to_value(tracker.tasks().tasks()).unwrap();
    let first = &tasks[0];
    assert_eq!(first["id"], 1);
    assert_eq!(first["title"], "Morning Meditation");
    assert_eq!(first["completed"], false);
    assert_eq!(first["streak"], 5);

    let rules = serde_json::to_value(tracker.rules().rules()).unwrap();
    assert_eq!(rules[1]["category"], "health");
    assert_eq!(rules[2]["enabled"], false);

    let achievements = serde_json::to_value(tracker.achievements().achievements()).unwrap();
    assert_eq!(achievements[2]["progress"], 3);
    assert_eq!(achievements[2]["total"], 10);
}

#[test]
fn reset_restores_every_collection() {
    let mut tracker = memory_tracker();
    tracker.tasks_mut().add("Extra task").unwrap();
    let rule_id = tracker.rules().rules()[0].id;
    tracker.rules_mut().delete(rule_id);
    tracker.profile_mut().set_name("Ada");

    tracker.reset();

    assert_eq!(tracker.tasks().tasks().len(), 3);
    assert_eq!(tracker.rules().rules().len(), 3);
    assert_eq!(tracker.profile().profile().name, "John Doe");
}
