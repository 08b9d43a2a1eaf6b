use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::core::normalize_local_date;

#[derive(Parser)]
#[command(name = "quasar")]
#[command(about = "Plan your life, set goals, schedule tasks and track your progress")]
#[command(long_about = "quasar - a life-planning tool for the terminal

Write down your purpose, vision and values, turn them into goals, break
goals into scheduled tasks, keep a reflection journal, and see how you are
doing with progress statistics.

QUICK START:
  quasar plan set --purpose \"Grow every day\"
  quasar goal add \"Learn Rust\" --description \"Ship a CLI\" --relevance \"Career\" --due 2025-06-30
  quasar task add \"Read the book\" --goal g1718000000000 --start today --from 18:00 --to 19:00
  quasar task today
  quasar stats

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  quasar <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output, or 'json' for
    /// machine-readable output. Defaults to `general.default_output` from
    /// the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Directory holding config.yaml and quasar.db (default: ~/.quasar)
    #[arg(long, global = true, env = "QUASAR_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Evaluate everything as of this date (YYYY-MM-DD) instead of the
    /// local date
    #[arg(long, global = true, value_parser = parse_iso_date)]
    pub today: Option<NaiveDate>,

    /// Log diagnostics to stderr (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show purpose, active goals and today's tasks
    ///
    /// # Examples
    ///
    ///   quasar dashboard
    ///   quasar d --today 2024-03-01
    #[command(alias = "d")]
    Dashboard,

    /// Show or edit the life plan
    Plan(PlanArgs),

    /// Manage goals
    #[command(alias = "g")]
    Goal(GoalArgs),

    /// Manage tasks
    #[command(alias = "t")]
    Task(TaskArgs),

    /// Keep a reflection journal
    #[command(alias = "r")]
    Reflect(ReflectArgs),

    /// Show a month calendar of scheduled tasks
    ///
    /// # Examples
    ///
    ///   quasar calendar                    Current month
    ///   quasar calendar --month 2024-02    A specific month
    ///   quasar calendar --day 2024-02-14   Tasks on one day
    #[command(alias = "cal")]
    Calendar(CalendarArgs),

    /// Show progress statistics
    ///
    /// Time invested, goal progress, completion rates, weekly productivity
    /// and the yearly consistency heatmap.
    ///
    /// # Examples
    ///
    ///   quasar stats                Full dashboard
    ///   quasar stats summary        Key numbers only
    ///   quasar stats heatmap -w 26  Last six months of completions
    Stats(StatsArgs),

    /// Import or export all data as JSON
    Data(DataArgs),

    /// Run a pomodoro timer: a work block, then a break
    ///
    /// Press Enter to pause or resume, `r` then Enter to reset to a fresh
    /// work block, and `q` then Enter to stop.
    ///
    /// # Examples
    ///
    ///   quasar focus                     25 minutes of work, 5 of break
    ///   quasar focus --work 50 --break 10
    ///   quasar focus --cycles 4
    Focus(FocusArgs),

    /// Generate shell completions
    ///
    /// Example: quasar completions zsh > ~/.zsh/completions/_quasar
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the life plan.
#[derive(Args)]
pub struct PlanArgs {
    #[command(subcommand)]
    pub command: Option<PlanCommands>,
}

/// Life plan subcommands.
#[derive(Subcommand)]
pub enum PlanCommands {
    /// Show the life plan (default)
    Show,

    /// Update parts of the life plan
    ///
    /// Only the given fields change.
    ///
    /// Example: quasar plan set --values "Integrity, Learning, Health"
    Set {
        /// Why you do what you do
        #[arg(long)]
        purpose: Option<String>,

        /// Where you want to be
        #[arg(long)]
        vision: Option<String>,

        /// Comma-separated core values
        #[arg(long)]
        values: Option<String>,
    },
}

/// Arguments for goals.
#[derive(Args)]
pub struct GoalArgs {
    #[command(subcommand)]
    pub command: GoalCommands,
}

/// Goal subcommands.
#[derive(Subcommand)]
pub enum GoalCommands {
    /// List all goals
    #[command(alias = "ls")]
    List,

    /// Add a goal
    ///
    /// Title, description, relevance and due date are all required.
    ///
    /// Example: quasar goal add "Run a marathon" --description "42 km" --relevance "Health" --due 2025-10-01
    Add(AddGoalArgs),

    /// Change the status of a goal
    ///
    /// Example: quasar goal status g1718000000000 in-progress
    Status {
        /// Goal ID
        id: String,

        /// New status (not-started, in-progress, completed, on-hold)
        status: String,
    },

    /// Delete a goal (its tasks are kept)
    #[command(alias = "rm")]
    Delete {
        /// Goal ID
        id: String,
    },
}

/// Arguments for adding a goal.
#[derive(Args)]
pub struct AddGoalArgs {
    /// Goal title
    pub title: String,

    /// What achieving the goal means
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Why the goal matters
    #[arg(long, short = 'r')]
    pub relevance: Option<String>,

    /// Due date (YYYY-MM-DD, today, tomorrow, friday, in 3 weeks)
    #[arg(long)]
    pub due: Option<String>,
}

/// Arguments for tasks.
#[derive(Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    pub command: TaskCommands,
}

/// Task subcommands.
#[derive(Subcommand)]
pub enum TaskCommands {
    /// List tasks
    #[command(alias = "ls")]
    List {
        /// Only tasks of this goal
        #[arg(long, short = 'g')]
        goal: Option<String>,

        /// Only pending tasks
        #[arg(long)]
        pending: bool,
    },

    /// List pending tasks scheduled for today
    Today,

    /// List pending tasks not scheduled for today
    Upcoming,

    /// Add a task to a goal
    ///
    /// A task with a start date and a time block is rejected when it
    /// overlaps a pending task on any day of its range.
    ///
    /// Example: quasar task add "Study" --goal g1 --start today --end "in 4 days" --from 18:00 --to 19:00
    Add(AddTaskArgs),

    /// Mark a task as completed now
    #[command(alias = "done")]
    Complete {
        /// Task ID
        id: String,
    },

    /// Delete a task
    #[command(alias = "rm")]
    Delete {
        /// Task ID
        id: String,
    },
}

/// Arguments for adding a task.
#[derive(Args)]
pub struct AddTaskArgs {
    /// What to do
    pub content: String,

    /// Goal ID the task belongs to
    #[arg(long, short = 'g')]
    pub goal: String,

    /// Priority (high, medium, low)
    #[arg(long, short = 'p', default_value = "medium")]
    pub priority: String,

    /// First day (YYYY-MM-DD, today, tomorrow, monday, in 2 days)
    #[arg(long, short = 's')]
    pub start: Option<String>,

    /// Last day, inclusive (defaults to the start day)
    #[arg(long, short = 'e')]
    pub end: Option<String>,

    /// Daily start time (HH:MM)
    #[arg(long)]
    pub from: Option<String>,

    /// Daily end time (HH:MM)
    #[arg(long)]
    pub to: Option<String>,
}

/// Arguments for reflections.
#[derive(Args)]
pub struct ReflectArgs {
    #[command(subcommand)]
    pub command: ReflectCommands,
}

/// Reflection subcommands.
#[derive(Subcommand)]
pub enum ReflectCommands {
    /// Write a journal entry
    ///
    /// Example: quasar reflect add "Finished chapter 3, felt great"
    Add {
        /// Entry text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Image to attach (URL or data URL)
        #[arg(long)]
        image: Option<String>,
    },

    /// List entries by month, newest first
    #[command(alias = "ls")]
    List,

    /// Show the question of the day
    Prompt,
}

/// Arguments for the calendar.
#[derive(Args)]
pub struct CalendarArgs {
    /// Month to show (YYYY-MM)
    #[arg(long, short = 'm', value_parser = parse_month)]
    pub month: Option<(i32, u32)>,

    /// List the tasks of a single day (YYYY-MM-DD)
    #[arg(long, short = 'd', value_parser = parse_iso_date)]
    pub day: Option<NaiveDate>,
}

/// Arguments for statistics.
#[derive(Args)]
pub struct StatsArgs {
    #[command(subcommand)]
    pub command: Option<StatsCommands>,
}

/// Statistics subcommands.
#[derive(Subcommand)]
pub enum StatsCommands {
    /// Show a quick summary of key metrics
    Summary,

    /// Show full dashboard with all metrics (default)
    Dashboard,

    /// Show estimated progress of every goal
    Goals,

    /// Show time invested per goal and per task
    Time,

    /// Show productivity of the most recent productive weeks
    Weekly,

    /// Show the consistency heatmap
    ///
    /// Visual calendar of completion activity over the last year.
    Heatmap {
        /// Number of weeks to show, 1 to 53 (default: stats.heatmap_weeks)
        #[arg(long, short = 'w', value_parser = clap::value_parser!(u16).range(1..=53))]
        weeks: Option<u16>,
    },
}

/// Arguments for the pomodoro timer.
#[derive(Args)]
pub struct FocusArgs {
    /// Work block in minutes
    #[arg(long, default_value_t = 25, value_parser = clap::value_parser!(u16).range(1..=240))]
    pub work: u16,

    /// Break in minutes
    #[arg(long = "break", default_value_t = 5, value_parser = clap::value_parser!(u16).range(1..=120))]
    pub break_minutes: u16,

    /// Work/break cycles to run before exiting
    #[arg(long, short = 'c', default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..=24))]
    pub cycles: u16,
}

/// Arguments for import/export.
#[derive(Args)]
pub struct DataArgs {
    #[command(subcommand)]
    pub command: DataCommands,
}

/// Data subcommands.
#[derive(Subcommand)]
pub enum DataCommands {
    /// Export the plan, goals, tasks and reflections as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,
    },

    /// Replace all data with an export
    ///
    /// Accepts files written by `quasar data export` as well as a dump of
    /// the web app's browser storage keys (nq_lifePlan, nq_goals, nq_tasks,
    /// nq_reflections).
    Import {
        /// JSON file to import
        file: PathBuf,
    },
}

/// Parse a `YYYY-MM-DD` argument.
///
/// # Errors
///
/// Returns a message when the input is not a valid calendar date.
pub fn parse_iso_date(input: &str) -> Result<NaiveDate, String> {
    normalize_local_date(input).ok_or_else(|| format!("invalid date '{input}', expected YYYY-MM-DD"))
}

/// Parse a `YYYY-MM` argument into `(year, month)`.
///
/// # Errors
///
/// Returns a message when the input is not a valid month.
pub fn parse_month(input: &str) -> Result<(i32, u32), String> {
    let invalid = || format!("invalid month '{input}', expected YYYY-MM");
    let (year, month) = input.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|_| (year, month))
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    // ==================== Value Parser Tests ====================

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(
            parse_iso_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_iso_date("2023-02-29").is_err());
        assert!(parse_iso_date("tomorrow").is_err());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2024-02").unwrap(), (2024, 2));
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("202402").is_err());
    }

    // ==================== CLI Parsing Tests ====================

    #[test]
    fn test_cli_dashboard_alias() {
        let cli = Cli::try_parse_from(["quasar", "d"]).unwrap();
        assert!(matches!(cli.command, Commands::Dashboard));
        assert!(cli.output.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "quasar", "stats", "--today", "2024-01-02", "-o", "json", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.today, NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_rejects_bad_today() {
        assert!(Cli::try_parse_from(["quasar", "dashboard", "--today", "soon"]).is_err());
    }

    #[test]
    fn test_cli_plan_defaults_to_show() {
        let cli = Cli::try_parse_from(["quasar", "plan"]).unwrap();
        if let Commands::Plan(args) = cli.command {
            assert!(args.command.is_none());
        } else {
            panic!("Expected Plan command");
        }
    }

    #[test]
    fn test_cli_goal_add() {
        let cli = Cli::try_parse_from([
            "quasar", "goal", "add", "Learn Rust", "-d", "Ship a CLI", "--due", "2025-06-30",
        ])
        .unwrap();
        if let Commands::Goal(GoalArgs { command: GoalCommands::Add(args) }) = cli.command {
            assert_eq!(args.title, "Learn Rust");
            assert_eq!(args.description.as_deref(), Some("Ship a CLI"));
            assert!(args.relevance.is_none());
            assert_eq!(args.due.as_deref(), Some("2025-06-30"));
        } else {
            panic!("Expected goal add");
        }
    }

    #[test]
    fn test_cli_task_add_requires_goal() {
        assert!(Cli::try_parse_from(["quasar", "task", "add", "Study"]).is_err());

        let cli = Cli::try_parse_from([
            "quasar", "t", "add", "Study", "-g", "g1", "--from", "18:00", "--to", "19:00",
        ])
        .unwrap();
        if let Commands::Task(TaskArgs { command: TaskCommands::Add(args) }) = cli.command {
            assert_eq!(args.goal, "g1");
            assert_eq!(args.priority, "medium");
            assert_eq!(args.from.as_deref(), Some("18:00"));
        } else {
            panic!("Expected task add");
        }
    }

    #[test]
    fn test_cli_task_upcoming() {
        let cli = Cli::try_parse_from(["quasar", "task", "upcoming"]).unwrap();
        assert!(matches!(cli.command, Commands::Task(TaskArgs { command: TaskCommands::Upcoming })));
    }

    #[test]
    fn test_cli_task_complete_alias() {
        let cli = Cli::try_parse_from(["quasar", "task", "done", "t1"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Task(TaskArgs { command: TaskCommands::Complete { ref id } }) if id == "t1"
        ));
    }

    #[test]
    fn test_cli_reflect_joins_words() {
        let cli = Cli::try_parse_from(["quasar", "reflect", "add", "good", "day"]).unwrap();
        if let Commands::Reflect(ReflectArgs { command: ReflectCommands::Add { text, image } }) =
            cli.command
        {
            assert_eq!(text.join(" "), "good day");
            assert!(image.is_none());
        } else {
            panic!("Expected reflect add");
        }
    }

    #[test]
    fn test_cli_reflect_image() {
        let cli = Cli::try_parse_from([
            "quasar", "reflect", "add", "summit", "--image", "https://example.org/top.jpg",
        ])
        .unwrap();
        if let Commands::Reflect(ReflectArgs { command: ReflectCommands::Add { text, image } }) =
            cli.command
        {
            assert_eq!(text, vec!["summit"]);
            assert_eq!(image.as_deref(), Some("https://example.org/top.jpg"));
        } else {
            panic!("Expected reflect add");
        }
    }

    #[test]
    fn test_cli_calendar_month() {
        let cli = Cli::try_parse_from(["quasar", "cal", "--month", "2024-02"]).unwrap();
        if let Commands::Calendar(args) = cli.command {
            assert_eq!(args.month, Some((2024, 2)));
            assert!(args.day.is_none());
        } else {
            panic!("Expected Calendar command");
        }
    }

    // ==================== Stats Subcommand Tests ====================

    #[test]
    fn test_cli_stats_default() {
        let cli = Cli::try_parse_from(["quasar", "stats"]).unwrap();
        if let Commands::Stats(args) = cli.command {
            // No subcommand means None (dashboard in the handler)
            assert!(args.command.is_none());
        } else {
            panic!("Expected Stats command");
        }
    }

    #[test]
    fn test_cli_stats_heatmap_weeks() {
        let cli = Cli::try_parse_from(["quasar", "stats", "heatmap", "-w", "26"]).unwrap();
        if let Commands::Stats(args) = cli.command {
            assert!(matches!(args.command, Some(StatsCommands::Heatmap { weeks: Some(26) })));
        } else {
            panic!("Expected Stats command");
        }
    }

    #[test]
    fn test_cli_stats_heatmap_weeks_out_of_range() {
        assert!(Cli::try_parse_from(["quasar", "stats", "heatmap", "-w", "0"]).is_err());
        assert!(Cli::try_parse_from(["quasar", "stats", "heatmap", "-w", "54"]).is_err());
        assert!(
            Cli::try_parse_from(["quasar", "stats", "heatmap", "-w", "18446744073709551615"])
                .is_err()
        );
    }

    #[test]
    fn test_cli_focus_defaults() {
        let cli = Cli::try_parse_from(["quasar", "focus"]).unwrap();
        if let Commands::Focus(args) = cli.command {
            assert_eq!(args.work, 25);
            assert_eq!(args.break_minutes, 5);
            assert_eq!(args.cycles, 1);
        } else {
            panic!("Expected Focus command");
        }
    }

    #[test]
    fn test_cli_focus_custom_blocks() {
        let cli =
            Cli::try_parse_from(["quasar", "focus", "--work", "50", "--break", "10", "-c", "3"])
                .unwrap();
        if let Commands::Focus(args) = cli.command {
            assert_eq!((args.work, args.break_minutes, args.cycles), (50, 10, 3));
        } else {
            panic!("Expected Focus command");
        }
        assert!(Cli::try_parse_from(["quasar", "focus", "--work", "0"]).is_err());
    }

    #[test]
    fn test_cli_completions_shell() {
        let cli = Cli::try_parse_from(["quasar", "completions", "zsh"]).unwrap();
        assert!(matches!(cli.command, Commands::Completions { shell: Shell::Zsh }));
    }

    // ==================== Output Format Tests ====================

    #[test]
    fn test_output_format_default() {
        assert!(matches!(OutputFormat::default(), OutputFormat::Pretty));
    }
}
