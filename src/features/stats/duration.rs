//! Time invested per task.
//!
//! A task with a daily time block (e.g. "study 18:00-19:00") accumulates the
//! block once for every calendar day from its start date through the day it
//! was completed, capped by its own end date.

use serde::{Deserialize, Serialize};

use crate::core::days_between;
use crate::model::Task;

/// A completed task together with the minutes it accounted for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDuration {
    pub task_id: String,
    pub goal_id: String,
    pub content: String,
    pub minutes: u64,
}

/// Minutes invested in a single task.
///
/// Only completed tasks with a start date, a start and end time and a
/// completion timestamp count. Everything else, including a non-positive
/// daily block or a completion day before the start date, yields 0.
#[must_use]
pub fn task_minutes(task: &Task) -> u64 {
    if !task.is_completed() {
        return 0;
    }
    let (Some(start), Some((from, to)), Some(completed)) =
        (task.start_date, task.time_block(), task.completed_on())
    else {
        return 0;
    };

    let daily_minutes = (to - from).num_minutes();
    if daily_minutes <= 0 {
        return 0;
    }

    let effective_end = task.end_date.map_or(completed, |end| end.min(completed));
    if effective_end < start {
        return 0;
    }

    let span_days = days_between(start, effective_end) + 1;
    u64::try_from(daily_minutes * span_days).unwrap_or(0)
}

/// Every task with a positive duration, in input order.
#[must_use]
pub fn completed_with_duration(tasks: &[Task]) -> Vec<TaskDuration> {
    tasks
        .iter()
        .filter_map(|task| {
            let minutes = task_minutes(task);
            (minutes > 0).then(|| TaskDuration {
                task_id: task.id.clone(),
                goal_id: task.goal_id.clone(),
                content: task.content.clone(),
                minutes,
            })
        })
        .collect()
}

/// Sum of minutes across `durations`, optionally restricted to one goal.
#[must_use]
pub fn total_minutes(durations: &[TaskDuration], goal_id: Option<&str>) -> u64 {
    durations
        .iter()
        .filter(|d| goal_id.map_or(true, |id| d.goal_id == id))
        .map(|d| d.minutes)
        .sum()
}
