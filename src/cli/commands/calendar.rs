//! Calendar command implementation.

use chrono::{Datelike, NaiveDate};
use colored::Colorize;
use serde_json::json;

use crate::cli::args::{CalendarArgs, OutputFormat};
use crate::error::QuasarError;
use crate::features::calendar::{render_month, tasks_by_date};
use crate::output::{format_tasks, schedule_label, to_json};
use crate::storage::PlanStore;

/// Execute the calendar command.
///
/// With `--day`, lists that day's tasks in start-time order; otherwise
/// draws the month (the current one by default) followed by its agenda.
///
/// # Errors
///
/// Returns an error if the store cannot be read or output formatting fails.
pub fn calendar(
    store: &PlanStore,
    args: &CalendarArgs,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, QuasarError> {
    let tasks = store.tasks()?;
    let goals = store.goals()?;
    let by_date = tasks_by_date(&tasks);

    if let Some(day) = args.day {
        let day_tasks = by_date.get(&day).cloned().unwrap_or_default();
        return format_tasks(&day_tasks, &goals, &day.format("%A, %B %-d").to_string(), format);
    }

    let (year, month) = args.month.unwrap_or((today.year(), today.month()));
    let in_month: Vec<_> = by_date
        .iter()
        .filter(|(date, _)| date.year() == year && date.month() == month)
        .collect();

    match format {
        OutputFormat::Json => {
            let days: Vec<_> = in_month
                .iter()
                .map(|(date, day_tasks)| json!({ "date": date, "tasks": day_tasks }))
                .collect();
            to_json(&json!({
                "month": format!("{year:04}-{month:02}"),
                "days": days,
            }))
        }
        OutputFormat::Pretty => {
            let mut output = vec![render_month(year, month, &by_date, today), String::new()];
            if in_month.is_empty() {
                output.push("  No tasks scheduled this month.".dimmed().to_string());
            }
            for (date, day_tasks) in in_month {
                output.push(date.format("%a %d").to_string().bold().to_string());
                for task in day_tasks {
                    let mark = if task.is_completed() { "[x]" } else { "[ ]" };
                    output.push(format!(
                        "  {mark} {}  {}",
                        task.content,
                        schedule_label(task).dimmed()
                    ));
                }
            }
            Ok(output.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GoalDraft, TaskDraft};
    use chrono::{NaiveTime, Utc};

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn store_with_tasks() -> PlanStore {
        let store = PlanStore::in_memory().unwrap();
        let goal = store
            .add_goal(
                GoalDraft {
                    title: "Fitness".to_string(),
                    description: "Run".to_string(),
                    due_date: Some(day("2024-03-31")),
                    relevance: "Health".to_string(),
                },
                Utc::now(),
            )
            .unwrap();
        for (content, from) in [("Evening run", Some(19)), ("Stretch", None), ("Morning run", Some(7))] {
            store
                .add_task(
                    TaskDraft {
                        goal_id: goal.id.clone(),
                        content: content.to_string(),
                        start_date: Some(day("2024-02-14")),
                        start_time: from.and_then(|h| NaiveTime::from_hms_opt(h, 0, 0)),
                        end_time: from.and_then(|h| NaiveTime::from_hms_opt(h, 30, 0)),
                        ..TaskDraft::default()
                    },
                    Utc::now(),
                )
                .unwrap();
        }
        store
    }

    #[test]
    fn test_calendar_day_orders_by_start_time() {
        let store = store_with_tasks();
        let args = CalendarArgs { month: None, day: Some(day("2024-02-14")) };
        let out = calendar(&store, &args, day("2024-02-01"), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let contents: Vec<&str> = value["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["content"].as_str().unwrap())
            .collect();
        assert_eq!(contents, vec!["Morning run", "Evening run", "Stretch"]);
    }

    #[test]
    fn test_calendar_month_json() {
        let store = store_with_tasks();
        let args = CalendarArgs { month: Some((2024, 2)), day: None };
        let out = calendar(&store, &args, day("2024-05-01"), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["month"], "2024-02");
        assert_eq!(value["days"].as_array().unwrap().len(), 1);
        assert_eq!(value["days"][0]["date"], "2024-02-14");
    }

    #[test]
    fn test_calendar_empty_month_pretty() {
        colored::control::set_override(false);
        let store = store_with_tasks();
        let args = CalendarArgs { month: Some((2024, 3)), day: None };
        let out = calendar(&store, &args, day("2024-03-05"), OutputFormat::Pretty).unwrap();
        assert!(out.contains("March 2024"));
        assert!(out.contains("No tasks scheduled this month."));
    }
}
