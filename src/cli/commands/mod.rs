//! Command implementations for quasar.
//!
//! This module contains the implementation of all CLI commands. Handlers
//! return the text to print; `main` does the printing.

mod calendar;
mod completions;
mod data;
mod focus;
mod reflect;
mod stats;

pub use calendar::calendar;
pub use completions::{completions, generate_completions};
pub use data::data;
pub use focus::focus;
pub use reflect::reflect;
pub use stats::stats;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use colored::Colorize;
use serde_json::json;

use crate::cli::args::{AddGoalArgs, AddTaskArgs, GoalCommands, OutputFormat, PlanCommands, TaskCommands};
use crate::core::{parse_date_arg, parse_time_of_day};
use crate::error::QuasarError;
use crate::features::schedule::{tasks_for_day, upcoming_pending};
use crate::model::{GoalDraft, GoalStatus, LifePlan, Priority, TaskDraft};
use crate::output::{
    format_goal, format_goals, format_plan, format_task, format_tasks, to_json,
};
use crate::storage::PlanStore;

/// Tasks shown on the dashboard.
const DASHBOARD_TASK_LIMIT: usize = 5;

/// Resolve an optional date argument against `today`.
fn resolve_date(
    input: Option<&str>,
    today: NaiveDate,
    field: &str,
) -> Result<Option<NaiveDate>, QuasarError> {
    input
        .map(|raw| {
            parse_date_arg(raw, today).ok_or_else(|| {
                QuasarError::InvalidInput(format!("invalid {field} '{raw}'"))
            })
        })
        .transpose()
}

fn resolve_time(input: Option<&str>, field: &str) -> Result<Option<NaiveTime>, QuasarError> {
    input
        .map(|raw| {
            parse_time_of_day(raw).ok_or_else(|| {
                QuasarError::InvalidInput(format!("invalid {field} '{raw}', expected HH:MM"))
            })
        })
        .transpose()
}

/// Execute dashboard command
///
/// # Errors
///
/// Returns an error if the store cannot be read or output formatting fails.
pub fn dashboard(
    store: &PlanStore,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, QuasarError> {
    let plan = store.life_plan()?;
    let goals = store.goals()?;
    let tasks = store.tasks()?;

    let active: Vec<_> = goals
        .iter()
        .filter(|g| g.status == GoalStatus::InProgress)
        .collect();
    let todays: Vec<_> = tasks_for_day(&tasks, today)
        .into_iter()
        .take(DASHBOARD_TASK_LIMIT)
        .collect();

    match format {
        OutputFormat::Json => to_json(&json!({
            "today": today,
            "purpose": plan.purpose,
            "activeGoals": active,
            "todaysTasks": todays,
        })),
        OutputFormat::Pretty => {
            let mut output = Vec::new();
            output.push(format!("{}  {}", "Your purpose".bold(), today.to_string().dimmed()));
            let purpose = if plan.purpose.trim().is_empty() {
                "Define your life's purpose to give meaning to your goals."
            } else {
                plan.purpose.as_str()
            };
            output.push(format!("  \"{}\"", purpose.italic()));
            output.push(String::new());

            output.push(format!("{} ({})", "Active goals".bold(), active.len()));
            output.push("─".repeat(50));
            if active.is_empty() {
                output.push("  No goals in progress. Time to set a new challenge!".to_string());
            }
            for goal in &active {
                output.push(format!("  {} {}", goal.id.dimmed(), goal.title));
            }
            output.push(String::new());

            output.push(format!("{} ({})", "Today's tasks".bold(), todays.len()));
            output.push("─".repeat(50));
            if todays.is_empty() {
                output.push("  Nothing scheduled for today.".to_string());
            }
            for task in &todays {
                let goal_title = goals
                    .iter()
                    .find(|g| g.id == task.goal_id)
                    .map_or("No goal", |g| g.title.as_str());
                output.push(format!(
                    "  [ ] {} {}  {}",
                    task.id.dimmed(),
                    task.content,
                    format!("({goal_title})").dimmed()
                ));
            }

            Ok(output.join("\n"))
        }
    }
}

/// Execute plan subcommands
///
/// # Errors
///
/// Returns an error if the store cannot be read or written.
pub fn plan(
    store: &PlanStore,
    cmd: Option<PlanCommands>,
    format: OutputFormat,
) -> Result<String, QuasarError> {
    match cmd {
        None | Some(PlanCommands::Show) => format_plan(&store.life_plan()?, format),
        Some(PlanCommands::Set { purpose, vision, values }) => {
            if purpose.is_none() && vision.is_none() && values.is_none() {
                return Err(QuasarError::InvalidInput(
                    "nothing to update: pass --purpose, --vision or --values".to_string(),
                ));
            }
            let mut plan: LifePlan = store.life_plan()?;
            if let Some(purpose) = purpose {
                plan.purpose = purpose.trim().to_string();
            }
            if let Some(vision) = vision {
                plan.vision = vision.trim().to_string();
            }
            if let Some(values) = values {
                plan.values = LifePlan::parse_values(&values);
            }
            store.save_life_plan(&plan)?;
            format_plan(&plan, format)
        }
    }
}

/// Execute goal subcommands
///
/// # Errors
///
/// Returns an error if validation fails, the goal does not exist, or the
/// store cannot be read or written.
pub fn goal(
    store: &PlanStore,
    cmd: GoalCommands,
    today: NaiveDate,
    now: DateTime<Utc>,
    format: OutputFormat,
) -> Result<String, QuasarError> {
    match cmd {
        GoalCommands::List => format_goals(&store.goals()?, format),
        GoalCommands::Add(args) => add_goal(store, args, today, now, format),
        GoalCommands::Status { id, status } => {
            let status: GoalStatus = status.parse()?;
            let goal = store.set_goal_status(&id, status)?;
            match format {
                OutputFormat::Json => to_json(&goal),
                OutputFormat::Pretty => Ok(format!("Goal {} is now {}", goal.title.bold(), status)),
            }
        }
        GoalCommands::Delete { id } => {
            let goal = store.delete_goal(&id)?;
            match format {
                OutputFormat::Json => to_json(&goal),
                OutputFormat::Pretty => Ok(format!("Deleted goal: {} ({})", goal.title, goal.id)),
            }
        }
    }
}

fn add_goal(
    store: &PlanStore,
    args: AddGoalArgs,
    today: NaiveDate,
    now: DateTime<Utc>,
    format: OutputFormat,
) -> Result<String, QuasarError> {
    let draft = GoalDraft {
        title: args.title,
        description: args.description.unwrap_or_default(),
        due_date: resolve_date(args.due.as_deref(), today, "due date")?,
        relevance: args.relevance.unwrap_or_default(),
    };
    let goal = store.add_goal(draft, now)?;

    match format {
        OutputFormat::Json => to_json(&goal),
        OutputFormat::Pretty => Ok(format!(
            "Created goal: {} (ID: {})\n\n{}",
            goal.title,
            goal.id,
            format_goal(&goal, format)?
        )),
    }
}

/// Execute task subcommands
///
/// # Errors
///
/// Returns an error if validation fails, the task or goal does not exist,
/// the task conflicts with another, or the store cannot be read or written.
pub fn task(
    store: &PlanStore,
    cmd: TaskCommands,
    today: NaiveDate,
    now: DateTime<Utc>,
    format: OutputFormat,
) -> Result<String, QuasarError> {
    match cmd {
        TaskCommands::List { goal, pending } => {
            let tasks = store.tasks()?;
            let goals = store.goals()?;
            let selected: Vec<_> = tasks
                .iter()
                .filter(|t| goal.as_deref().map_or(true, |g| t.goal_id == g))
                .filter(|t| !pending || !t.is_completed())
                .collect();
            let title = if pending { "Pending tasks" } else { "All tasks" };
            format_tasks(&selected, &goals, title, format)
        }
        TaskCommands::Today => {
            let tasks = store.tasks()?;
            let goals = store.goals()?;
            let todays = tasks_for_day(&tasks, today);
            format_tasks(&todays, &goals, &format!("Today {today}"), format)
        }
        TaskCommands::Upcoming => {
            let tasks = store.tasks()?;
            let goals = store.goals()?;
            format_tasks(&upcoming_pending(&tasks, today), &goals, "Upcoming", format)
        }
        TaskCommands::Add(args) => add_task(store, args, today, now, format),
        TaskCommands::Complete { id } => {
            let task = store.complete_task(&id, now)?;
            match format {
                OutputFormat::Json => to_json(&task),
                OutputFormat::Pretty => Ok(format!("Completed task: {} ({})", task.content, task.id)),
            }
        }
        TaskCommands::Delete { id } => {
            let task = store.delete_task(&id)?;
            match format {
                OutputFormat::Json => to_json(&task),
                OutputFormat::Pretty => Ok(format!("Deleted task: {} ({})", task.content, task.id)),
            }
        }
    }
}

fn add_task(
    store: &PlanStore,
    args: AddTaskArgs,
    today: NaiveDate,
    now: DateTime<Utc>,
    format: OutputFormat,
) -> Result<String, QuasarError> {
    let start_date = resolve_date(args.start.as_deref(), today, "start date")?;
    let end_date = resolve_date(args.end.as_deref(), today, "end date")?;
    if let (Some(start), Some(end)) = (start_date, end_date) {
        if end < start {
            return Err(QuasarError::InvalidInput(format!(
                "end date {end} is before start date {start}"
            )));
        }
    }

    let draft = TaskDraft {
        goal_id: args.goal,
        content: args.content,
        priority: args.priority.parse::<Priority>()?,
        start_date,
        end_date,
        start_time: resolve_time(args.from.as_deref(), "start time")?,
        end_time: resolve_time(args.to.as_deref(), "end time")?,
    };
    let task = store.add_task(draft, now)?;

    match format {
        OutputFormat::Json => to_json(&task),
        OutputFormat::Pretty => {
            let goals = store.goals()?;
            Ok(format!(
                "Created task: {} (ID: {})\n\n{}",
                task.content,
                task.id,
                format_task(&task, &goals, format)?
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn store_with_goal() -> (PlanStore, String) {
        let store = PlanStore::in_memory().unwrap();
        let goal = store
            .add_goal(
                GoalDraft {
                    title: "Learn Rust".to_string(),
                    description: "Ship a CLI".to_string(),
                    due_date: Some(day("2024-12-31")),
                    relevance: "Career".to_string(),
                },
                Utc::now(),
            )
            .unwrap();
        (store, goal.id)
    }

    fn add_args(goal: &str, start: Option<&str>, end: Option<&str>) -> AddTaskArgs {
        AddTaskArgs {
            content: "Read".to_string(),
            goal: goal.to_string(),
            priority: "high".to_string(),
            start: start.map(ToString::to_string),
            end: end.map(ToString::to_string),
            from: Some("18:00".to_string()),
            to: Some("19:00".to_string()),
        }
    }

    #[test]
    fn test_plan_set_updates_values() {
        let store = PlanStore::in_memory().unwrap();
        let out = plan(
            &store,
            Some(PlanCommands::Set {
                purpose: None,
                vision: None,
                values: Some(" Health , ,Focus".to_string()),
            }),
            OutputFormat::Json,
        )
        .unwrap();
        assert!(out.contains("\"Health\""));
        assert_eq!(store.life_plan().unwrap().values, vec!["Health", "Focus"]);
    }

    #[test]
    fn test_plan_set_requires_a_field() {
        let store = PlanStore::in_memory().unwrap();
        let err = plan(
            &store,
            Some(PlanCommands::Set { purpose: None, vision: None, values: None }),
            OutputFormat::Pretty,
        )
        .unwrap_err();
        assert!(matches!(err, QuasarError::InvalidInput(_)));
    }

    #[test]
    fn test_add_task_resolves_relative_dates() {
        let (store, goal_id) = store_with_goal();
        add_task(
            &store,
            add_args(&goal_id, Some("today"), Some("in 2 days")),
            day("2024-03-01"),
            Utc::now(),
            OutputFormat::Json,
        )
        .unwrap();
        let task = &store.tasks().unwrap()[0];
        assert_eq!(task.start_date, Some(day("2024-03-01")));
        assert_eq!(task.end_date, Some(day("2024-03-03")));
        assert_eq!(task.priority, Priority::High);
    }

    #[test]
    fn test_add_task_rejects_inverted_range() {
        let (store, goal_id) = store_with_goal();
        let err = add_task(
            &store,
            add_args(&goal_id, Some("2024-03-05"), Some("2024-03-01")),
            day("2024-03-01"),
            Utc::now(),
            OutputFormat::Pretty,
        )
        .unwrap_err();
        assert!(matches!(err, QuasarError::InvalidInput(_)));
    }

    #[test]
    fn test_add_task_rejects_bad_time() {
        let (store, goal_id) = store_with_goal();
        let mut args = add_args(&goal_id, Some("today"), None);
        args.from = Some("25:00".to_string());
        let err = add_task(&store, args, day("2024-03-01"), Utc::now(), OutputFormat::Pretty)
            .unwrap_err();
        assert!(matches!(err, QuasarError::InvalidInput(ref m) if m.contains("start time")));
    }

    #[test]
    fn test_dashboard_limits_tasks() {
        let (store, goal_id) = store_with_goal();
        store.set_goal_status(&goal_id, GoalStatus::InProgress).unwrap();
        for hour in 8..15 {
            let mut args = add_args(&goal_id, Some("2024-03-01"), None);
            args.from = Some(format!("{hour:02}:00"));
            args.to = Some(format!("{hour:02}:30"));
            add_task(&store, args, day("2024-03-01"), Utc::now(), OutputFormat::Json).unwrap();
        }

        let out = dashboard(&store, day("2024-03-01"), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["todaysTasks"].as_array().unwrap().len(), DASHBOARD_TASK_LIMIT);
        assert_eq!(value["activeGoals"].as_array().unwrap().len(), 1);
    }
}
