//! Goal progress estimation.
//!
//! A goal's progress is measured against its schedule: the window runs from
//! the earliest start date among its tasks to the goal's due date, and the
//! goal earns credit for every day, from the window start, on which all of
//! its tasks due by that day are already completed. The first day with an
//! overdue pending task ends the credited prefix.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{days_between, days_inclusive};
use crate::model::{Goal, Task};

/// Progress of one goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub goal_id: String,
    pub title: String,
    /// 0-100
    pub progress: f64,
}

/// Share of `tasks` that are completed, as a percentage (0 when empty).
#[must_use]
pub fn completion_ratio(tasks: &[&Task]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    let completed = tasks.iter().filter(|t| t.is_completed()).count();
    percentage(completed, tasks.len())
}

/// Estimate progress (0-100) of `goal` as of `today`.
///
/// `tasks` may contain tasks of other goals; only those whose `goal_id`
/// matches are considered.
#[must_use]
pub fn goal_progress(goal: &Goal, tasks: &[Task], today: NaiveDate) -> f64 {
    if goal.is_completed() {
        return 100.0;
    }

    let goal_tasks: Vec<&Task> = tasks.iter().filter(|t| t.goal_id == goal.id).collect();
    if goal_tasks.is_empty() {
        return 0.0;
    }

    let earliest_start = goal_tasks.iter().filter_map(|t| t.start_date).min();
    let (Some(start), Some(due)) = (earliest_start, goal.due_date) else {
        return completion_ratio(&goal_tasks);
    };

    if today < start || due <= start {
        return 0.0;
    }
    if today > due {
        return completion_ratio(&goal_tasks);
    }

    let last_on_track = last_on_track_day(&goal_tasks, start, today);
    let on_track_days = last_on_track.map_or(0, |day| days_between(start, day) + 1);
    let window_days = days_between(start, due) + 1;

    on_track_days.max(0) as f64 * 100.0 / window_days as f64
}

/// Last day of the unbroken run of on-track days starting at `start`.
///
/// A day is on track when every task ending on or before it is completed.
/// `None` when `start` itself is already off track.
fn last_on_track_day(tasks: &[&Task], start: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    days_inclusive(start, today)
        .take_while(|day| {
            tasks
                .iter()
                .filter(|t| t.end_date.is_some_and(|end| end <= *day))
                .all(|t| t.is_completed())
        })
        .last()
}

/// Progress for every goal, in input order.
#[must_use]
pub fn all_goal_progress(goals: &[Goal], tasks: &[Task], today: NaiveDate) -> Vec<GoalProgress> {
    goals
        .iter()
        .map(|goal| GoalProgress {
            goal_id: goal.id.clone(),
            title: goal.title.clone(),
            progress: goal_progress(goal, tasks, today),
        })
        .collect()
}

pub(crate) fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}
