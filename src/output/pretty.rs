use colored::Colorize;

use crate::features::reflection::group_by_month;
use crate::model::{Goal, GoalStatus, LifePlan, Priority, ReflectionEntry, Task, TaskStatus};

/// Title of the goal a task belongs to.
fn goal_title<'a>(goals: &'a [Goal], goal_id: &str) -> &'a str {
    goals
        .iter()
        .find(|g| g.id == goal_id)
        .map_or("No goal", |g| g.title.as_str())
}

fn colored_goal_status(status: GoalStatus) -> String {
    let label = status.as_str();
    match status {
        GoalStatus::NotStarted => label.white().to_string(),
        GoalStatus::InProgress => label.cyan().to_string(),
        GoalStatus::Completed => label.green().to_string(),
        GoalStatus::OnHold => label.yellow().to_string(),
    }
}

fn colored_priority(priority: Priority) -> String {
    let label = priority.to_string();
    match priority {
        Priority::High => label.red().to_string(),
        Priority::Medium => label.yellow().to_string(),
        Priority::Low => label.blue().to_string(),
    }
}

/// Date range and time block of a task, e.g. `2024-01-01..2024-01-05 18:00-19:00`.
pub fn schedule_label(task: &Task) -> String {
    let mut parts = Vec::new();
    match (task.start_date, task.end_date) {
        (Some(start), Some(end)) if end != start => parts.push(format!("{start}..{end}")),
        (Some(start), _) => parts.push(start.to_string()),
        (None, Some(end)) => parts.push(format!("until {end}")),
        (None, None) => {}
    }
    match (task.start_time, task.end_time) {
        (Some(from), Some(to)) => parts.push(format!("{}-{}", from.format("%H:%M"), to.format("%H:%M"))),
        (Some(from), None) => parts.push(from.format("%H:%M").to_string()),
        _ => {}
    }
    parts.join(" ")
}

/// Format the life plan
pub fn format_plan_pretty(plan: &LifePlan) -> String {
    let mut output = format!("{}\n", "Life Plan".bold());
    output.push_str(&"─".repeat(60));
    output.push('\n');
    output.push_str(&format!("{}\n  {}\n\n", "Purpose".dimmed(), plan.purpose));
    output.push_str(&format!("{}\n  {}\n\n", "Vision".dimmed(), plan.vision));
    output.push_str(&format!("{}\n", "Values".dimmed()));
    if plan.values.is_empty() {
        output.push_str("  (none)\n");
    }
    for value in &plan.values {
        output.push_str(&format!("  • {value}\n"));
    }
    output
}

/// Format a list of goals as a pretty table
pub fn format_goals_pretty(goals: &[Goal]) -> String {
    if goals.is_empty() {
        return "Goals (0)\n  No goals".to_string();
    }

    let mut output = format!("Goals ({})\n", goals.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for goal in goals {
        let mut line = format!(
            "{} {}  {}",
            goal.id.dimmed(),
            goal.title.bold(),
            colored_goal_status(goal.status)
        );
        if let Some(due) = goal.due_date {
            line.push_str(&format!("  due {}", due.to_string().yellow()));
        }
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a single goal as pretty output
pub fn format_goal_pretty(goal: &Goal) -> String {
    let mut output = format!("{}\n", goal.title.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), goal.id));
    output.push_str(&format!("  {}: {}\n", "Status".dimmed(), colored_goal_status(goal.status)));

    if !goal.description.is_empty() {
        output.push_str(&format!("  {}: {}\n", "Description".dimmed(), goal.description));
    }
    if let Some(due) = goal.due_date {
        output.push_str(&format!("  {}: {}\n", "Due".dimmed(), due));
    }
    if !goal.relevance.is_empty() {
        output.push_str(&format!("  {}: {}\n", "Relevance".dimmed(), goal.relevance));
    }

    output
}

/// Format a list of tasks as a pretty table
pub fn format_tasks_pretty(tasks: &[&Task], goals: &[Goal], title: &str) -> String {
    if tasks.is_empty() {
        return format!("{title} (0 items)\n  No items");
    }

    let mut output = format!("{} ({} items)\n", title, tasks.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for task in tasks {
        let status_icon = match task.status {
            TaskStatus::Pending => "[ ]".white(),
            TaskStatus::Completed => "[x]".green(),
        };

        let mut line = format!(
            "{} {} {}  {}",
            status_icon,
            task.id.dimmed(),
            task.content.bold(),
            colored_priority(task.priority)
        );

        let schedule = schedule_label(task);
        if !schedule.is_empty() {
            line.push_str(&format!("  {}", schedule.yellow()));
        }
        line.push_str(&format!("  {}", goal_title(goals, &task.goal_id).cyan()));

        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a single task as pretty output
pub fn format_task_pretty(task: &Task, goals: &[Goal]) -> String {
    let status_icon = match task.status {
        TaskStatus::Pending => "[ ]".white(),
        TaskStatus::Completed => "[x]".green(),
    };

    let mut output = format!("{} {}\n", status_icon, task.content.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), task.id));
    output.push_str(&format!("  {}: {}\n", "Goal".dimmed(), goal_title(goals, &task.goal_id)));
    output.push_str(&format!("  {}: {}\n", "Status".dimmed(), task.status));
    output.push_str(&format!("  {}: {}\n", "Priority".dimmed(), colored_priority(task.priority)));

    let schedule = schedule_label(task);
    if !schedule.is_empty() {
        output.push_str(&format!("  {}: {}\n", "Scheduled".dimmed(), schedule));
    }
    if let Some(done) = task.completion_date {
        output.push_str(&format!(
            "  {}: {}\n",
            "Completed".dimmed(),
            done.format("%Y-%m-%d %H:%M UTC")
        ));
    }

    output
}

/// Format reflections grouped by month, newest first
pub fn format_reflections_pretty(entries: &[ReflectionEntry]) -> String {
    if entries.is_empty() {
        return "Reflections (0)\n  No entries yet".to_string();
    }

    let mut output = format!("Reflections ({})\n", entries.len());
    for (month, items) in group_by_month(entries) {
        output.push_str(&"─".repeat(60));
        output.push('\n');
        output.push_str(&format!("{}\n", month.bold()));
        for entry in items {
            output.push_str(&format!(
                "  {}  {}\n",
                entry.date.format("%Y-%m-%d %H:%M").to_string().dimmed(),
                entry.content
            ));
            if let Some(url) = &entry.image_url {
                output.push_str(&format!("                    {} {}\n", "image:".dimmed(), url));
            }
        }
    }

    output
}
