//! Month calendar of scheduled tasks.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveTime};
use colored::Colorize;

use crate::core::days_inclusive;
use crate::model::Task;

/// Start time used for ordering tasks without one.
fn sort_time(task: &Task) -> NaiveTime {
    task.start_time
        .or_else(|| NaiveTime::from_hms_opt(23, 59, 0))
        .unwrap_or_default()
}

/// Expand every dated task over each day of its range.
///
/// Within a day tasks are ordered by start time; untimed tasks sort as
/// 23:59 and ties keep input order.
#[must_use]
pub fn tasks_by_date(tasks: &[Task]) -> BTreeMap<NaiveDate, Vec<&Task>> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&Task>> = BTreeMap::new();

    for task in tasks {
        if let Some((start, end)) = task.scheduled_range() {
            for day in days_inclusive(start, end) {
                by_date.entry(day).or_default().push(task);
            }
        }
    }

    for day_tasks in by_date.values_mut() {
        day_tasks.sort_by_key(|t| sort_time(t));
    }

    by_date
}

/// Days of a month laid out in Sunday-first weeks.
///
/// Cells outside the month are `None`; the length is always a multiple of
/// seven. An invalid month yields an empty grid.
#[must_use]
pub fn month_grid(year: i32, month: u32) -> Vec<Option<NaiveDate>> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    let lead = first.weekday().num_days_from_sunday() as usize;
    let mut cells: Vec<Option<NaiveDate>> = vec![None; lead];
    cells.extend(
        first
            .iter_days()
            .take_while(|d| d.month() == month)
            .map(Some),
    );

    let trailing = (7 - cells.len() % 7) % 7;
    cells.extend(std::iter::repeat(None).take(trailing));
    cells
}

/// Render a month as a text grid.
///
/// Each day shows its number and, when tasks fall on it, their count in
/// brackets. `today` is highlighted.
pub fn render_month(
    year: i32,
    month: u32,
    by_date: &BTreeMap<NaiveDate, Vec<&Task>>,
    today: NaiveDate,
) -> String {
    let grid = month_grid(year, month);
    let title = NaiveDate::from_ymd_opt(year, month, 1)
        .map_or_else(String::new, |d| d.format("%B %Y").to_string());

    let mut lines = vec![
        format!("{:^56}", title).bold().to_string(),
        ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
            .iter()
            .map(|d| format!("{d:<8}"))
            .collect::<String>()
            .trim_end()
            .dimmed()
            .to_string(),
    ];

    for week in grid.chunks(7) {
        let mut line = String::new();
        for cell in week {
            let text = match cell {
                Some(date) => {
                    let count = by_date.get(date).map_or(0, Vec::len);
                    let label = if count > 0 {
                        format!("{:>2} [{count}]", date.day())
                    } else {
                        format!("{:>2}", date.day())
                    };
                    let padded = format!("{label:<8}");
                    if *date == today {
                        padded.reversed().to_string()
                    } else if count > 0 {
                        padded.cyan().to_string()
                    } else {
                        padded
                    }
                }
                None => " ".repeat(8),
            };
            line.push_str(&text);
        }
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::stats::test_support::{date, pending_task, time};

    #[test]
    fn test_month_grid_sunday_first() {
        // February 2024 starts on a Thursday and has 29 days.
        let grid = month_grid(2024, 2);
        assert_eq!(grid.len() % 7, 0);
        assert_eq!(grid.len(), 35);
        assert!(grid[..4].iter().all(Option::is_none));
        assert_eq!(grid[4], Some(date("2024-02-01")));
        assert_eq!(grid[32], Some(date("2024-02-29")));
        assert!(grid[33].is_none());
    }

    #[test]
    fn test_month_grid_starting_sunday() {
        // September 2024 starts on a Sunday.
        let grid = month_grid(2024, 9);
        assert_eq!(grid[0], Some(date("2024-09-01")));
        assert_eq!(grid.len(), 35);
    }

    #[test]
    fn test_month_grid_invalid_month() {
        assert!(month_grid(2024, 13).is_empty());
    }

    #[test]
    fn test_tasks_expanded_and_sorted() {
        let mut late = pending_task("t1", "g1", Some("2024-01-01"), Some("2024-01-03"));
        late.start_time = Some(time("18:00"));
        let untimed = pending_task("t2", "g1", Some("2024-01-02"), None);
        let mut early = pending_task("t3", "g1", Some("2024-01-02"), None);
        early.start_time = Some(time("07:30"));
        let undated = pending_task("t4", "g1", None, None);

        let tasks = vec![late, untimed, early, undated];
        let map = tasks_by_date(&tasks);

        assert_eq!(map.len(), 3);
        let jan2: Vec<&str> = map[&date("2024-01-02")].iter().map(|t| t.id.as_str()).collect();
        assert_eq!(jan2, vec!["t3", "t1", "t2"]);
        assert_eq!(map[&date("2024-01-03")].len(), 1);
    }

    #[test]
    fn test_inverted_range_expands_to_nothing() {
        let tasks = vec![pending_task("t1", "g1", Some("2024-01-05"), Some("2024-01-01"))];
        assert!(tasks_by_date(&tasks).is_empty());
    }

    #[test]
    fn test_render_month_marks_task_days() {
        colored::control::set_override(false);
        let tasks = vec![pending_task("t1", "g1", Some("2024-02-14"), None)];
        let map = tasks_by_date(&tasks);
        let out = render_month(2024, 2, &map, date("2024-02-01"));
        assert!(out.contains("February 2024"));
        assert!(out.contains("14 [1]"));
    }
}
