//! Completion consistency: per-day completion counts and streaks.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::Task;

/// Days covered by the consistency map, today included.
pub const CONSISTENCY_WINDOW_DAYS: i64 = 365;

/// Count completed tasks per completion day over the trailing
/// [`CONSISTENCY_WINDOW_DAYS`] ending at `today`.
///
/// Days without completions are absent.
#[must_use]
pub fn consistency_map(tasks: &[Task], today: NaiveDate) -> BTreeMap<NaiveDate, usize> {
    let window_start = today - Duration::days(CONSISTENCY_WINDOW_DAYS - 1);
    let mut counts = BTreeMap::new();

    for task in tasks.iter().filter(|t| t.is_completed()) {
        if let Some(day) = task.completed_on() {
            if day >= window_start && day <= today {
                *counts.entry(day).or_default() += 1;
            }
        }
    }

    counts
}

/// Streak information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakInfo {
    /// Current streak (consecutive days with completions)
    pub current: usize,
    /// Longest streak in the window
    pub longest: usize,
    /// Last completion date
    pub last_completion: Option<NaiveDate>,
    /// Days since last completion
    pub days_since_completion: usize,
}

impl StreakInfo {
    /// Calculate streaks from a consistency map.
    ///
    /// The current streak counts back from `today`, or from yesterday when
    /// nothing has been completed today yet.
    #[must_use]
    pub fn from_map(counts: &BTreeMap<NaiveDate, usize>, today: NaiveDate) -> Self {
        let last_completion = counts.keys().next_back().copied();
        let days_since_completion = last_completion
            .map_or(0, |d| usize::try_from((today - d).num_days().max(0)).unwrap_or(0));

        let has = |day: NaiveDate| counts.get(&day).is_some_and(|c| *c > 0);
        let anchor = if has(today) {
            Some(today)
        } else if has(today - Duration::days(1)) {
            Some(today - Duration::days(1))
        } else {
            None
        };

        let mut current = 0;
        if let Some(mut day) = anchor {
            while has(day) {
                current += 1;
                day -= Duration::days(1);
            }
        }

        let mut longest = 0;
        let mut streak = 0;
        let mut prev: Option<NaiveDate> = None;
        for day in counts.keys().copied() {
            streak = match prev {
                Some(p) if (day - p).num_days() == 1 => streak + 1,
                _ => 1,
            };
            longest = longest.max(streak);
            prev = Some(day);
        }

        Self {
            current,
            longest,
            last_completion,
            days_since_completion,
        }
    }
}
