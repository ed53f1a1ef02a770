//! # modi
//!
//! A local-first habit tracker: daily tasks, personal rules (behavioral
//! boundaries), streaks, and achievements.
//!
//! ## Architecture
//!
//! - **Persistence adapter** (`store`): typed, fail-soft key-value storage
//!   over a closed key registry — in-memory (DashMap) or durable (redb)
//! - **Entity controllers** (`task`, `rule`, `achievement`, `profile`):
//!   in-memory collections with toggle/add/edit/delete and derived stats
//! - **Seed packs** (`seeds`): bundled TOML defaults used until a key is
//!   first written
//! - **Facade** (`tracker`): owns the adapter and all controllers
//!
//! ## Library usage
//!
//! ```no_run
//! use modi::tracker::{Tracker, TrackerConfig};
//!
//! let mut tracker = Tracker::new(TrackerConfig::default()).unwrap();
//! let id = tracker.tasks_mut().add("Morning run").unwrap();
//! tracker.tasks_mut().toggle(id);
//! println!("{}", tracker.info());
//! ```

pub mod achievement;
pub mod collection;
pub mod error;
pub mod paths;
pub mod profile;
pub mod record;
pub mod rule;
pub mod seeds;
pub mod store;
pub mod task;
pub mod tracker;
