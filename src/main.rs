//! modi CLI: local-first habit tracker.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};

use modi::paths::ModiPaths;
use modi::record::RecordId;
use modi::rule::{Category, RuleDraft};
use modi::tracker::{Tracker, TrackerConfig};

#[derive(Parser)]
#[command(name = "modi", version, about = "Local-first habit tracker")]
struct Cli {
    /// Data directory for persistent storage (defaults to the XDG data dir).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Run memory-only: nothing is written to disk.
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the modi data directory.
    Init,

    /// View and manage daily tasks.
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// View and manage personal rules.
    Rule {
        #[command(subcommand)]
        action: RuleAction,
    },

    /// List the achievement catalog.
    Achievements,

    /// Show and edit the user profile.
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Show derived statistics for all collections.
    Stats,

    /// Show tracker info.
    Info,

    /// Export a collection as JSON.
    Export {
        #[command(subcommand)]
        action: ExportAction,
    },

    /// Wipe all stored data and return to seed defaults.
    Reset,
}

#[derive(Subcommand)]
enum TaskAction {
    /// List all tasks.
    List,
    /// Add a new task.
    Add {
        /// Task title.
        title: String,
    },
    /// Toggle a task's completed flag.
    Toggle {
        /// Numeric task ID.
        id: u64,
    },
}

#[derive(Subcommand)]
enum RuleAction {
    /// List all rules.
    List,
    /// Add a new rule.
    Add {
        /// Rule title.
        title: String,

        /// Why the rule exists.
        #[arg(long, default_value = "")]
        description: String,

        /// Rule category.
        #[arg(long, value_enum, default_value_t = Category::Discipline)]
        category: Category,
    },
    /// Edit an existing rule (omitted fields keep their current values).
    Edit {
        /// Numeric rule ID.
        id: u64,

        /// New title.
        #[arg(long)]
        title: Option<String>,

        /// New description.
        #[arg(long)]
        description: Option<String>,

        /// New category.
        #[arg(long, value_enum)]
        category: Option<Category>,
    },
    /// Delete a rule.
    Delete {
        /// Numeric rule ID.
        id: u64,
    },
    /// Toggle a rule's enabled flag.
    Toggle {
        /// Numeric rule ID.
        id: u64,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show the profile and streak counters.
    Show,
    /// Set profile fields.
    Set {
        /// Display name.
        #[arg(long)]
        name: Option<String>,

        /// Email address.
        #[arg(long)]
        email: Option<String>,
    },
    /// Flip a preference switch.
    Toggle {
        /// Which switch to flip.
        #[arg(value_enum)]
        switch: Switch,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Switch {
    Notifications,
    DarkMode,
    Privacy,
}

#[derive(Subcommand)]
enum ExportAction {
    /// Export the task list as JSON.
    Tasks,
    /// Export the rule list as JSON.
    Rules,
    /// Export the achievement catalog as JSON.
    Achievements,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let data_dir = if cli.ephemeral {
        None
    } else {
        match cli.data_dir.clone() {
            Some(dir) => Some(dir),
            None => {
                let paths = ModiPaths::resolve().into_diagnostic()?;
                paths.ensure_dirs().into_diagnostic()?;
                Some(paths.data_dir)
            }
        }
    };
    let config = TrackerConfig { data_dir };

    let mut tracker = Tracker::new(config).into_diagnostic()?;

    match cli.command {
        Commands::Init => {
            match tracker.config().data_dir.as_deref() {
                Some(dir) => println!("Initialized modi at {}", dir.display()),
                None => println!("Initialized modi (ephemeral)"),
            }
            println!("{}", tracker.info());
        }

        Commands::Task { action } => match action {
            TaskAction::List => {
                for task in tracker.tasks().tasks() {
                    let mark = if task.completed { "x" } else { " " };
                    let streak = if task.streak > 0 {
                        format!("  ({} day streak)", task.streak)
                    } else {
                        String::new()
                    };
                    println!("  [{mark}] {} {}{streak}", task.id, task.title);
                }
            }
            TaskAction::Add { title } => match tracker.tasks_mut().add(&title) {
                Some(id) => println!("Added task {id}"),
                None => println!("Nothing added: task titles cannot be empty."),
            },
            TaskAction::Toggle { id } => {
                let id = parse_id(id)?;
                tracker.tasks_mut().toggle(id);
                match tracker.tasks().get(id) {
                    Some(task) => {
                        let state = if task.completed { "done" } else { "not done" };
                        println!("Task {id} is now {state}.");
                    }
                    None => println!("No task {id}."),
                }
            }
        },

        Commands::Rule { action } => match action {
            RuleAction::List => {
                for rule in tracker.rules().rules() {
                    let state = if rule.enabled { "active" } else { "inactive" };
                    println!("  {} [{}] {} ({state})", rule.id, rule.category, rule.title);
                    if !rule.description.is_empty() {
                        println!("      {}", rule.description);
                    }
                }
            }
            RuleAction::Add {
                title,
                description,
                category,
            } => {
                let draft = RuleDraft {
                    title,
                    description,
                    category,
                };
                match tracker.rules_mut().add(draft) {
                    Some(id) => println!("Added rule {id}"),
                    None => println!("Nothing added: rule titles cannot be empty."),
                }
            }
            RuleAction::Edit {
                id,
                title,
                description,
                category,
            } => {
                let id = parse_id(id)?;
                // Prefill from the existing rule, like the edit form does.
                let Some(existing) = tracker.rules().get(id).cloned() else {
                    println!("No rule {id}.");
                    return Ok(());
                };
                let draft = RuleDraft {
                    title: title.unwrap_or(existing.title),
                    description: description.unwrap_or(existing.description),
                    category: category.unwrap_or(existing.category),
                };
                if tracker.rules_mut().update(id, draft) {
                    println!("Updated rule {id}");
                } else {
                    println!("Nothing changed: rule titles cannot be empty.");
                }
            }
            RuleAction::Delete { id } => {
                let id = parse_id(id)?;
                if tracker.rules_mut().delete(id) {
                    println!("Deleted rule {id}");
                } else {
                    println!("No rule {id}.");
                }
            }
            RuleAction::Toggle { id } => {
                let id = parse_id(id)?;
                tracker.rules_mut().toggle(id);
                match tracker.rules().get(id) {
                    Some(rule) => {
                        let state = if rule.enabled { "active" } else { "inactive" };
                        println!("Rule {id} is now {state}.");
                    }
                    None => println!("No rule {id}."),
                }
            }
        },

        Commands::Achievements => {
            for a in tracker.achievements().achievements() {
                let mark = if a.unlocked { "★" } else { "☆" };
                println!(
                    "  {mark} {} - {} ({}/{}, {}%)",
                    a.title,
                    a.description,
                    a.progress,
                    a.total,
                    a.progress_percent()
                );
            }
            let stats = tracker.achievements().stats();
            println!(
                "\n{}/{} unlocked · {} points",
                stats.unlocked, stats.total, stats.total_points
            );
        }

        Commands::Profile { action } => match action {
            ProfileAction::Show => {
                let profile = tracker.profile().profile();
                let streaks = tracker.profile().streaks();
                println!("{} <{}>", profile.name, profile.email);
                println!("  notifications: {}", on_off(profile.notifications));
                println!("  dark mode:     {}", on_off(profile.dark_mode));
                println!("  privacy:       {}", on_off(profile.privacy));
                println!("  streak:        {} days (best {})", streaks.current_streak, streaks.longest_streak);
                println!("  tasks done:    {}", streaks.tasks_done);
                println!("  rules set:     {}", streaks.rules_set);
            }
            ProfileAction::Set { name, email } => {
                if let Some(name) = name {
                    if tracker.profile_mut().set_name(&name) {
                        println!("Name set.");
                    } else {
                        println!("Name unchanged: it cannot be empty.");
                    }
                }
                if let Some(email) = email {
                    if tracker.profile_mut().set_email(&email) {
                        println!("Email set.");
                    } else {
                        println!("Email unchanged: it cannot be empty.");
                    }
                }
            }
            ProfileAction::Toggle { switch } => {
                let new_value = match switch {
                    Switch::Notifications => tracker.profile_mut().toggle_notifications(),
                    Switch::DarkMode => tracker.profile_mut().toggle_dark_mode(),
                    Switch::Privacy => tracker.profile_mut().toggle_privacy(),
                };
                println!("{switch:?} is now {}.", on_off(new_value));
            }
        },

        Commands::Stats => {
            let tasks = tracker.tasks().stats();
            let rules = tracker.rules().stats();
            let achievements = tracker.achievements().stats();
            println!("Today's progress: {}% ({}/{} tasks)", tasks.completion_rate, tasks.completed, tasks.total);
            println!("Rules in force:   {}/{}", rules.active, rules.total);
            println!(
                "Achievements:     {}/{} ({}%), {} points",
                achievements.unlocked,
                achievements.total,
                achievements.completion_rate,
                achievements.total_points
            );
        }

        Commands::Info => {
            println!("{}", tracker.info());
        }

        Commands::Export { action } => {
            let json = match action {
                ExportAction::Tasks => {
                    serde_json::to_string_pretty(tracker.tasks().tasks()).into_diagnostic()?
                }
                ExportAction::Rules => {
                    serde_json::to_string_pretty(tracker.rules().rules()).into_diagnostic()?
                }
                ExportAction::Achievements => {
                    serde_json::to_string_pretty(tracker.achievements().achievements())
                        .into_diagnostic()?
                }
            };
            println!("{json}");
        }

        Commands::Reset => {
            tracker.reset();
            println!("Reset to seed data.");
            println!("{}", tracker.info());
        }
    }

    Ok(())
}

/// Parse a CLI-supplied numeric ID. Zero is never a valid record ID.
fn parse_id(raw: u64) -> Result<RecordId> {
    RecordId::new(raw).ok_or_else(|| miette::miette!("0 is not a valid ID"))
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}
