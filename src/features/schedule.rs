//! Task scheduling: time-block conflicts and the tasks due on a given day.

use chrono::NaiveDate;

use crate::core::days_inclusive;
use crate::model::{Task, TaskDraft};

/// Find the first existing task whose time block overlaps the draft's.
///
/// Only drafts with a start date and both times are checked. Completed
/// tasks and tasks without a full time block never conflict. Two blocks
/// overlap when each starts before the other ends, so back-to-back blocks
/// are allowed.
#[must_use]
pub fn find_conflict<'a>(draft: &TaskDraft, existing: &'a [Task]) -> Option<&'a Task> {
    let (Some((start, end)), Some(new_start), Some(new_end)) =
        (draft.scheduled_range(), draft.start_time, draft.end_time)
    else {
        return None;
    };

    days_inclusive(start, end).find_map(|day| {
        existing.iter().find(|task| {
            if task.is_completed() || !task.is_scheduled_on(day) {
                return false;
            }
            task.time_block()
                .is_some_and(|(from, to)| new_start < to && new_end > from)
        })
    })
}

/// Pending tasks that fall on `day`.
///
/// A task without an end date belongs only to its start date.
#[must_use]
pub fn tasks_for_day(tasks: &[Task], day: NaiveDate) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| !task.is_completed() && task.is_scheduled_on(day))
        .collect()
}

/// Pending tasks that do not fall on `day`.
#[must_use]
pub fn upcoming_pending(tasks: &[Task], day: NaiveDate) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| !task.is_completed() && !task.is_scheduled_on(day))
        .collect()
}
