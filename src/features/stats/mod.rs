//! Statistics module.
//!
//! Derives progress analytics from goals and tasks:
//! - Time invested per task and per goal
//! - Goal progress against the schedule
//! - Completion ratios and on-time completion
//! - Weekly productivity and the yearly consistency map

pub mod consistency;
pub mod duration;
pub mod metrics;
pub mod progress;
pub mod visualization;
pub mod weekly;

pub use consistency::{consistency_map, StreakInfo, CONSISTENCY_WINDOW_DAYS};
pub use duration::{completed_with_duration, task_minutes, total_minutes, TaskDuration};
pub use metrics::{
    on_time_percentage, CompletionMetrics, DailyFocus, GoalTime, Statistics, TimeMetrics,
};
pub use progress::{all_goal_progress, completion_ratio, goal_progress, GoalProgress};
pub use visualization::{
    heatmap_span_days, render_bar_chart, render_heatmap, render_progress_bar, render_sparkline,
    render_summary_box,
};
pub use weekly::{weekly_productivity, weekly_productivity_window, WeeklyProductivity, WEEKLY_WINDOW};

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

    use crate::model::{Goal, GoalStatus, Priority, Task, TaskStatus};

    pub fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    pub fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    pub fn completed_task(
        id: &str,
        goal_id: &str,
        start: &str,
        end: Option<&str>,
        start_time: &str,
        end_time: &str,
        completion: &str,
    ) -> Task {
        Task {
            id: id.to_string(),
            goal_id: goal_id.to_string(),
            content: format!("task {id}"),
            status: TaskStatus::Completed,
            priority: Priority::Medium,
            start_date: Some(date(start)),
            end_date: end.map(date),
            start_time: Some(time(start_time)),
            end_time: Some(time(end_time)),
            completion_date: Some(
                DateTime::parse_from_rfc3339(completion)
                    .unwrap()
                    .with_timezone(&Utc),
            ),
        }
    }

    pub fn pending_task(id: &str, goal_id: &str, start: Option<&str>, end: Option<&str>) -> Task {
        Task {
            id: id.to_string(),
            goal_id: goal_id.to_string(),
            content: format!("task {id}"),
            status: TaskStatus::Pending,
            priority: Priority::Medium,
            start_date: start.map(date),
            end_date: end.map(date),
            start_time: None,
            end_time: None,
            completion_date: None,
        }
    }

    pub fn goal(id: &str, status: GoalStatus, due: Option<&str>) -> Goal {
        Goal {
            id: id.to_string(),
            title: format!("goal {id}"),
            description: String::new(),
            status,
            due_date: due.map(date),
            relevance: String::new(),
        }
    }
}
