//! Statistics command implementation.
//!
//! Handles the stats subcommands for progress analytics.

use chrono::NaiveDate;
use colored::Colorize;
use serde_json::json;

use crate::cli::args::{OutputFormat, StatsCommands};
use crate::config::StatsConfig;
use crate::core::format_minutes;
use crate::error::QuasarError;
use crate::features::stats::{
    heatmap_span_days, render_bar_chart, render_heatmap, render_progress_bar, render_sparkline,
    render_summary_box, Statistics,
};
use crate::output::to_json;
use crate::storage::PlanStore;

/// Execute stats subcommands.
///
/// # Errors
///
/// Returns an error if the store cannot be read or output formatting fails.
pub fn stats(
    store: &PlanStore,
    cmd: Option<StatsCommands>,
    today: NaiveDate,
    config: &StatsConfig,
    format: OutputFormat,
) -> Result<String, QuasarError> {
    let tasks = store.tasks()?;
    let goals = store.goals()?;
    let stats = Statistics::compute_with_window(&tasks, &goals, today, config.weekly_window);

    match cmd {
        None | Some(StatsCommands::Dashboard) => render_dashboard(&stats, format),
        Some(StatsCommands::Summary) => render_summary(&stats, format),
        Some(StatsCommands::Goals) => render_goals(&stats, format),
        Some(StatsCommands::Time) => render_time(&stats, format),
        Some(StatsCommands::Weekly) => render_weekly(&stats, format),
        Some(StatsCommands::Heatmap { weeks }) => {
            let weeks = weeks.map_or(config.heatmap_weeks, usize::from);
            render_heatmap_cmd(&stats, weeks, format)
        }
    }
}

fn on_time_label(stats: &Statistics) -> String {
    stats
        .completion
        .on_time_percentage
        .map_or_else(|| "N/A".to_string(), |p| format!("{p:.0}%"))
}

fn percent_value(percentage: f64) -> u64 {
    percentage.round().clamp(0.0, 100.0) as u64
}

/// Render the full dashboard.
fn render_dashboard(stats: &Statistics, format: OutputFormat) -> Result<String, QuasarError> {
    match format {
        OutputFormat::Json => to_json(stats),
        OutputFormat::Pretty => {
            let mut output = Vec::new();

            output.push("╔════════════════════════════════════════════════════════════════╗".to_string());
            output.push("║                     PROGRESS DASHBOARD                         ║".to_string());
            output.push("╚════════════════════════════════════════════════════════════════╝".to_string());
            output.push(String::new());

            output.push("TODAY".bold().to_string());
            output.push("─".repeat(50));
            output.push(format!(
                "  {}  {} of {} scheduled tasks done",
                stats.today,
                stats.daily_focus.completed.to_string().green(),
                stats.daily_focus.scheduled
            ));
            output.push(format!("  {}", render_progress_bar(stats.daily_focus.percentage, 30)));
            output.push(String::new());

            output.push("COMPLETION".bold().to_string());
            output.push("─".repeat(50));
            output.push(format!(
                "  Tasks: {}/{}  {}",
                stats.completion.completed_tasks,
                stats.completion.total_tasks,
                render_progress_bar(stats.completion.task_completion, 20)
            ));
            output.push(format!(
                "  Goals: {}/{}  {}",
                stats.completion.completed_goals,
                stats.completion.total_goals,
                render_progress_bar(stats.completion.goal_completion, 20)
            ));
            output.push(format!("  On time: {}", on_time_label(stats).cyan()));
            output.push(String::new());

            output.push("TIME INVESTED".bold().to_string());
            output.push("─".repeat(50));
            output.push(format!(
                "  Total: {}",
                format_minutes(stats.time.total_minutes).green()
            ));
            for goal in stats.time.per_goal.iter().filter(|g| g.minutes > 0) {
                output.push(format!("  {}: {}", goal.title, format_minutes(goal.minutes)));
            }
            output.push(String::new());

            if !stats.goal_progress.is_empty() {
                output.push("GOAL PROGRESS".bold().to_string());
                output.push("─".repeat(50));
                for goal in &stats.goal_progress {
                    output.push(format!(
                        "  {:<24} {}",
                        goal.title,
                        render_progress_bar(goal.progress, 20)
                    ));
                }
                output.push(String::new());
            }

            output.push("STREAK".bold().to_string());
            output.push("─".repeat(50));
            let streak_display = if stats.streak.current > 0 {
                format!("{} days", stats.streak.current).green().to_string()
            } else {
                "0 days".dimmed().to_string()
            };
            output.push(format!(
                "  Current: {}  Longest: {} days",
                streak_display, stats.streak.longest
            ));
            if !stats.weekly.is_empty() {
                let weekly: Vec<usize> = stats.weekly.iter().map(|w| w.completed_count).collect();
                output.push(format!("  Weekly completions: {}", render_sparkline(&weekly)));
            }

            Ok(output.join("\n"))
        }
    }
}

/// Render a quick summary.
fn render_summary(stats: &Statistics, format: OutputFormat) -> Result<String, QuasarError> {
    match format {
        OutputFormat::Json => to_json(&json!({
            "today": stats.today,
            "completion": stats.completion,
            "totalMinutes": stats.time.total_minutes,
            "dailyFocus": stats.daily_focus,
            "streak": stats.streak,
        })),
        OutputFormat::Pretty => Ok(render_summary_box(
            "Summary",
            &[
                ("Time invested", format_minutes(stats.time.total_minutes)),
                (
                    "Tasks completed",
                    format!(
                        "{}/{} ({:.0}%)",
                        stats.completion.completed_tasks,
                        stats.completion.total_tasks,
                        stats.completion.task_completion
                    ),
                ),
                (
                    "Goals completed",
                    format!(
                        "{}/{} ({:.0}%)",
                        stats.completion.completed_goals,
                        stats.completion.total_goals,
                        stats.completion.goal_completion
                    ),
                ),
                ("On time", on_time_label(stats)),
                (
                    "Today",
                    format!(
                        "{}/{} ({:.0}%)",
                        stats.daily_focus.completed,
                        stats.daily_focus.scheduled,
                        stats.daily_focus.percentage
                    ),
                ),
                ("Current streak", format!("{} days", stats.streak.current)),
            ],
        )),
    }
}

/// Render estimated goal progress.
fn render_goals(stats: &Statistics, format: OutputFormat) -> Result<String, QuasarError> {
    match format {
        OutputFormat::Json => to_json(&stats.goal_progress),
        OutputFormat::Pretty => {
            let mut output = Vec::new();
            output.push("Goal Progress".bold().to_string());
            output.push("═".repeat(50));

            if stats.goal_progress.is_empty() {
                output.push("No goals yet.".dimmed().to_string());
                return Ok(output.join("\n"));
            }

            let data: Vec<(String, u64)> = stats
                .goal_progress
                .iter()
                .map(|g| (g.title.clone(), percent_value(g.progress)))
                .collect();
            output.push(render_bar_chart(&data, 20, 30, |v| format!("{v}%")));

            Ok(output.join("\n"))
        }
    }
}

/// Render time invested per goal and per task.
fn render_time(stats: &Statistics, format: OutputFormat) -> Result<String, QuasarError> {
    match format {
        OutputFormat::Json => to_json(&stats.time),
        OutputFormat::Pretty => {
            let mut output = Vec::new();
            output.push(
                format!("Time Invested: {}", format_minutes(stats.time.total_minutes))
                    .bold()
                    .to_string(),
            );
            output.push("═".repeat(50));
            output.push(String::new());

            output.push("By goal:".to_string());
            let per_goal: Vec<(String, u64)> = stats
                .time
                .per_goal
                .iter()
                .map(|g| (g.title.clone(), g.minutes))
                .collect();
            if per_goal.is_empty() {
                output.push("  No goals yet.".dimmed().to_string());
            } else {
                output.push(render_bar_chart(&per_goal, 20, 30, format_minutes));
            }
            output.push(String::new());

            output.push("By task:".to_string());
            if stats.time.tasks.is_empty() {
                output.push("  No timed tasks completed yet.".dimmed().to_string());
            }
            for task in &stats.time.tasks {
                output.push(format!(
                    "  {:<30} {:>10}  {}",
                    task.content,
                    format_minutes(task.minutes),
                    task.task_id.dimmed()
                ));
            }

            Ok(output.join("\n"))
        }
    }
}

/// Render weekly productivity.
fn render_weekly(stats: &Statistics, format: OutputFormat) -> Result<String, QuasarError> {
    match format {
        OutputFormat::Json => to_json(&stats.weekly),
        OutputFormat::Pretty => {
            let mut output = Vec::new();
            output.push("Weekly Productivity".bold().to_string());
            output.push("═".repeat(50));

            if stats.weekly.is_empty() {
                output.push("No completed tasks yet.".dimmed().to_string());
                return Ok(output.join("\n"));
            }

            let data: Vec<(String, u64)> = stats
                .weekly
                .iter()
                .map(|w| (w.key.clone(), percent_value(w.percentage)))
                .collect();
            output.push(render_bar_chart(&data, 8, 30, |v| format!("{v}%")));
            output.push(String::new());

            for week in &stats.weekly {
                output.push(format!(
                    "  {}  {}/{} tasks",
                    week.key.dimmed(),
                    week.completed_count,
                    week.scheduled_count
                ));
            }

            Ok(output.join("\n"))
        }
    }
}

/// Render heatmap.
fn render_heatmap_cmd(
    stats: &Statistics,
    weeks: usize,
    format: OutputFormat,
) -> Result<String, QuasarError> {
    match format {
        OutputFormat::Json => to_json(&stats.consistency),
        OutputFormat::Pretty => {
            let mut output = Vec::new();

            let days = heatmap_span_days(weeks);
            output.push(format!("Consistency (last {days} days)").bold().to_string());
            output.push("═".repeat(50));
            output.push(String::new());
            output.push(render_heatmap(&stats.consistency, stats.today, weeks));

            Ok(output.join("\n"))
        }
    }
}
