//! Aggregate statistics over goals and tasks.
//!
//! [`Statistics::compute`] is a pure function of its inputs: `today` is a
//! parameter, never read from the clock, so identical inputs always produce
//! identical output.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::consistency::{consistency_map, StreakInfo};
use super::duration::{completed_with_duration, total_minutes, TaskDuration};
use super::progress::{all_goal_progress, percentage, GoalProgress};
use super::weekly::{weekly_productivity_window, WeeklyProductivity, WEEKLY_WINDOW};
use crate::model::{Goal, Task};

/// Completion counts and ratios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionMetrics {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// 0-100
    pub task_completion: f64,
    pub total_goals: usize,
    pub completed_goals: usize,
    /// 0-100
    pub goal_completion: f64,
    /// Share of completed tasks with an end date that were completed on or
    /// before it. `None` when no completed task has an end date.
    pub on_time_percentage: Option<f64>,
}

impl CompletionMetrics {
    /// Calculate completion metrics.
    #[must_use]
    pub fn calculate(tasks: &[Task], goals: &[Goal]) -> Self {
        let completed_tasks = tasks.iter().filter(|t| t.is_completed()).count();
        let completed_goals = goals.iter().filter(|g| g.is_completed()).count();

        Self {
            total_tasks: tasks.len(),
            completed_tasks,
            task_completion: percentage(completed_tasks, tasks.len()),
            total_goals: goals.len(),
            completed_goals,
            goal_completion: percentage(completed_goals, goals.len()),
            on_time_percentage: on_time_percentage(tasks),
        }
    }
}

/// On-time completion percentage.
///
/// Completed tasks without an end date are left out of both sides of the
/// ratio; a completed task with an end date but no completion timestamp
/// counts as late.
#[must_use]
pub fn on_time_percentage(tasks: &[Task]) -> Option<f64> {
    let with_deadline: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.is_completed() && t.end_date.is_some())
        .collect();

    if with_deadline.is_empty() {
        return None;
    }

    let on_time = with_deadline
        .iter()
        .filter(|t| match (t.completed_on(), t.end_date) {
            (Some(done), Some(end)) => done <= end,
            _ => false,
        })
        .count();

    Some(percentage(on_time, with_deadline.len()))
}

/// Tasks scheduled for a single day and how many of them are done.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyFocus {
    pub date: NaiveDate,
    pub scheduled: usize,
    pub completed: usize,
    /// 0-100
    pub percentage: f64,
}

impl DailyFocus {
    /// Calculate focus for `day` over every task whose range includes it.
    #[must_use]
    pub fn calculate(tasks: &[Task], day: NaiveDate) -> Self {
        let scheduled: Vec<&Task> = tasks.iter().filter(|t| t.is_scheduled_on(day)).collect();
        let completed = scheduled.iter().filter(|t| t.is_completed()).count();

        Self {
            date: day,
            scheduled: scheduled.len(),
            completed,
            percentage: percentage(completed, scheduled.len()),
        }
    }
}

/// Minutes invested in one goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalTime {
    pub goal_id: String,
    pub title: String,
    pub minutes: u64,
}

/// Time accounting across all tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeMetrics {
    pub total_minutes: u64,
    /// One entry per goal, in goal order.
    pub per_goal: Vec<GoalTime>,
    /// Completed tasks with a positive duration, in task order.
    pub tasks: Vec<TaskDuration>,
}

impl TimeMetrics {
    /// Calculate time metrics.
    #[must_use]
    pub fn calculate(tasks: &[Task], goals: &[Goal]) -> Self {
        let durations = completed_with_duration(tasks);
        let per_goal = goals
            .iter()
            .map(|goal| GoalTime {
                goal_id: goal.id.clone(),
                title: goal.title.clone(),
                minutes: total_minutes(&durations, Some(&goal.id)),
            })
            .collect();

        Self {
            total_minutes: total_minutes(&durations, None),
            per_goal,
            tasks: durations,
        }
    }
}

/// Everything derived from the goal and task lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub today: NaiveDate,
    pub completion: CompletionMetrics,
    pub time: TimeMetrics,
    pub goal_progress: Vec<GoalProgress>,
    pub daily_focus: DailyFocus,
    pub weekly: Vec<WeeklyProductivity>,
    /// Completions per day over the trailing year.
    pub consistency: BTreeMap<NaiveDate, usize>,
    pub streak: StreakInfo,
}

impl Statistics {
    /// Derive statistics as of `today`.
    #[must_use]
    pub fn compute(tasks: &[Task], goals: &[Goal], today: NaiveDate) -> Self {
        Self::compute_with_window(tasks, goals, today, WEEKLY_WINDOW)
    }

    /// Derive statistics keeping `weekly_window` productive weeks.
    #[must_use]
    pub fn compute_with_window(
        tasks: &[Task],
        goals: &[Goal],
        today: NaiveDate,
        weekly_window: usize,
    ) -> Self {
        let consistency = consistency_map(tasks, today);
        let streak = StreakInfo::from_map(&consistency, today);

        let stats = Self {
            today,
            completion: CompletionMetrics::calculate(tasks, goals),
            time: TimeMetrics::calculate(tasks, goals),
            goal_progress: all_goal_progress(goals, tasks, today),
            daily_focus: DailyFocus::calculate(tasks, today),
            weekly: weekly_productivity_window(tasks, weekly_window),
            consistency,
            streak,
        };

        tracing::trace!(
            tasks = tasks.len(),
            goals = goals.len(),
            %today,
            total_minutes = stats.time.total_minutes,
            "computed statistics"
        );

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::stats::test_support::{completed_task, date, goal, pending_task};
    use crate::model::GoalStatus;

    fn scenario() -> (Vec<Task>, Vec<Goal>) {
        let tasks = vec![completed_task(
            "t1", "g1", "2024-01-01", Some("2024-01-01"), "09:00", "10:00", "2024-01-01T10:05:00Z",
        )];
        let goals = vec![goal("g1", GoalStatus::InProgress, Some("2024-01-10"))];
        (tasks, goals)
    }

    #[test]
    fn test_single_task_scenario() {
        let (tasks, goals) = scenario();
        let stats = Statistics::compute(&tasks, &goals, date("2024-01-02"));

        assert_eq!(stats.time.total_minutes, 60);
        assert_eq!(stats.time.per_goal[0].minutes, 60);
        assert_eq!(stats.completion.on_time_percentage, Some(100.0));
        assert_eq!(stats.goal_progress[0].progress, 20.0);
        assert_eq!(stats.completion.task_completion, 100.0);
        assert_eq!(stats.completion.goal_completion, 0.0);
    }

    #[test]
    fn test_idempotent() {
        let (tasks, goals) = scenario();
        let a = Statistics::compute(&tasks, &goals, date("2024-01-02"));
        let b = Statistics::compute(&tasks, &goals, date("2024-01-02"));
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
    }

    #[test]
    fn test_empty_inputs() {
        let stats = Statistics::compute(&[], &[], date("2024-01-02"));
        assert_eq!(stats.completion.task_completion, 0.0);
        assert_eq!(stats.completion.goal_completion, 0.0);
        assert_eq!(stats.completion.on_time_percentage, None);
        assert_eq!(stats.daily_focus.percentage, 0.0);
        assert!(stats.weekly.is_empty());
        assert!(stats.consistency.is_empty());
    }

    #[test]
    fn test_undated_pending_task_only_in_totals() {
        let tasks = vec![
            pending_task("t1", "g1", None, None),
            completed_task("t2", "g1", "2024-01-02", Some("2024-01-02"), "09:00", "10:00", "2024-01-02T10:00:00Z"),
        ];
        let stats = Statistics::compute(&tasks, &[], date("2024-01-02"));
        assert_eq!(stats.completion.total_tasks, 2);
        assert_eq!(stats.completion.task_completion, 50.0);
        assert_eq!(stats.completion.on_time_percentage, Some(100.0));
        assert_eq!(stats.daily_focus.scheduled, 1);
        assert_eq!(stats.daily_focus.percentage, 100.0);
        assert_eq!(stats.weekly[0].scheduled_count, 1);
        assert_eq!(stats.time.tasks.len(), 1);
    }

    #[test]
    fn test_on_time_counts_late_and_excludes_open_ended() {
        let tasks = vec![
            completed_task("t1", "g1", "2024-01-01", Some("2024-01-02"), "09:00", "10:00", "2024-01-02T23:00:00Z"),
            completed_task("t2", "g1", "2024-01-01", Some("2024-01-02"), "09:00", "10:00", "2024-01-03T08:00:00Z"),
            completed_task("t3", "g1", "2024-01-01", None, "09:00", "10:00", "2024-02-01T08:00:00Z"),
        ];
        assert_eq!(on_time_percentage(&tasks), Some(50.0));
    }

    #[test]
    fn test_on_time_undefined_without_deadlines() {
        let tasks = vec![completed_task("t1", "g1", "2024-01-01", None, "09:00", "10:00", "2024-01-01T10:00:00Z")];
        assert_eq!(on_time_percentage(&tasks), None);
    }

    #[test]
    fn test_daily_focus_uses_ranges() {
        let tasks = vec![
            pending_task("t1", "g1", Some("2024-01-01"), Some("2024-01-05")),
            pending_task("t2", "g1", Some("2024-01-03"), None),
            completed_task("t3", "g1", "2024-01-02", Some("2024-01-03"), "09:00", "10:00", "2024-01-03T10:00:00Z"),
            pending_task("t4", "g1", Some("2024-01-04"), None),
        ];
        let focus = DailyFocus::calculate(&tasks, date("2024-01-03"));
        assert_eq!(focus.scheduled, 3);
        assert_eq!(focus.completed, 1);
    }

    #[test]
    fn test_time_per_goal_includes_idle_goals() {
        let (tasks, mut goals) = scenario();
        goals.push(goal("g2", GoalStatus::NotStarted, None));
        let time = TimeMetrics::calculate(&tasks, &goals);
        assert_eq!(time.per_goal.len(), 2);
        assert_eq!(time.per_goal[1].minutes, 0);
    }
}
