//! Weekly productivity.
//!
//! A task counts as scheduled in every ISO week its date range touches. Its
//! single completion is credited to the ISO week of its completion day, and
//! only when that week is one of the weeks the task was scheduled in.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::progress::percentage;
use crate::core::{days_inclusive, iso_week_key};
use crate::model::Task;

/// Number of most recent productive weeks reported.
pub const WEEKLY_WINDOW: usize = 12;

/// Completion ratio of one ISO week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyProductivity {
    /// `YYYY-Www`
    pub key: String,
    pub completed_count: usize,
    pub scheduled_count: usize,
    pub percentage: f64,
}

#[derive(Debug, Default)]
struct WeekBucket<'a> {
    scheduled: BTreeSet<&'a str>,
    completed: BTreeSet<&'a str>,
}

/// Weekly productivity for the last [`WEEKLY_WINDOW`] weeks that have at
/// least one completion, oldest first.
#[must_use]
pub fn weekly_productivity(tasks: &[Task]) -> Vec<WeeklyProductivity> {
    weekly_productivity_window(tasks, WEEKLY_WINDOW)
}

/// Same as [`weekly_productivity`] with a custom number of weeks.
#[must_use]
pub fn weekly_productivity_window(tasks: &[Task], window: usize) -> Vec<WeeklyProductivity> {
    let mut weeks: BTreeMap<String, WeekBucket<'_>> = BTreeMap::new();

    for task in tasks {
        let Some((start, end)) = task.scheduled_range() else {
            continue;
        };

        let task_weeks: BTreeSet<String> = days_inclusive(start, end).map(iso_week_key).collect();
        for key in &task_weeks {
            weeks
                .entry(key.clone())
                .or_default()
                .scheduled
                .insert(task.id.as_str());
        }

        if !task.is_completed() {
            continue;
        }
        if let Some(done) = task.completed_on() {
            let done_key = iso_week_key(done);
            if task_weeks.contains(&done_key) {
                weeks
                    .entry(done_key)
                    .or_default()
                    .completed
                    .insert(task.id.as_str());
            }
        }
    }

    let productive: Vec<WeeklyProductivity> = weeks
        .into_iter()
        .filter(|(_, bucket)| !bucket.completed.is_empty())
        .map(|(key, bucket)| WeeklyProductivity {
            key,
            completed_count: bucket.completed.len(),
            scheduled_count: bucket.scheduled.len(),
            percentage: percentage(bucket.completed.len(), bucket.scheduled.len()),
        })
        .collect();

    let skip = productive.len().saturating_sub(window);
    productive.into_iter().skip(skip).collect()
}
