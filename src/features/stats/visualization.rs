//! Terminal visualization for statistics.
//!
//! Provides ASCII charts, graphs, and visual representations.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use super::consistency::CONSISTENCY_WINDOW_DAYS;

/// Characters for bar chart rendering.
const BAR_CHARS: [char; 8] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇'];
const FULL_BLOCK: char = '█';

/// Truncate or pad `label` to exactly `width` characters.
fn fit_label(label: &str, width: usize) -> String {
    if label.chars().count() > width {
        let kept: String = label.chars().take(width.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        format!("{label:width$}")
    }
}

/// Render a horizontal bar chart.
///
/// # Arguments
///
/// * `data` - Vec of (label, value) pairs
/// * `max_label_width` - Maximum width for labels
/// * `bar_width` - Width of the bar portion
///
/// Bars are scaled against the largest value. Values are printed as-is, so
/// callers pass pre-formatted text through `format_value`.
pub fn render_bar_chart<F>(
    data: &[(String, u64)],
    max_label_width: usize,
    bar_width: usize,
    format_value: F,
) -> String
where
    F: Fn(u64) -> String,
{
    if data.is_empty() {
        return String::new();
    }

    let max_value = data.iter().map(|(_, v)| *v).max().unwrap_or(1).max(1);
    let mut lines = Vec::new();

    for (label, value) in data {
        let bar_length = ((*value as f64 / max_value as f64) * bar_width as f64) as usize;
        let bar_length = bar_length.min(bar_width);
        let bar = FULL_BLOCK.to_string().repeat(bar_length);
        let padding = " ".repeat(bar_width - bar_length);

        lines.push(format!(
            "{} |{}{} {}",
            fit_label(label, max_label_width),
            bar,
            padding,
            format_value(*value)
        ));
    }

    lines.join("\n")
}

/// Render a sparkline (compact inline chart).
pub fn render_sparkline(values: &[usize]) -> String {
    if values.is_empty() {
        return String::new();
    }

    let max_value = values.iter().max().copied().unwrap_or(1).max(1);

    values
        .iter()
        .map(|&v| {
            if v == 0 {
                BAR_CHARS[0]
            } else {
                let normalized = (v as f64 / max_value as f64 * 7.0) as usize;
                BAR_CHARS[normalized.clamp(1, 7)]
            }
        })
        .collect()
}

/// Heatmap cell for a number of completions on one day.
const fn heat_cell(count: usize) -> char {
    match count {
        0 => '·',
        1 => '░',
        2 | 3 => '▒',
        4 | 5 => '▓',
        _ => '█',
    }
}

/// Number of days a heatmap of `weeks` weeks covers, capped at
/// [`CONSISTENCY_WINDOW_DAYS`].
#[must_use]
pub fn heatmap_span_days(weeks: usize) -> i64 {
    i64::try_from(weeks.max(1).saturating_mul(7))
        .unwrap_or(CONSISTENCY_WINDOW_DAYS)
        .min(CONSISTENCY_WINDOW_DAYS)
}

/// Render the consistency heatmap.
///
/// One column per week and one row per weekday, Sunday first, ending at
/// `today`. At most [`CONSISTENCY_WINDOW_DAYS`] days are drawn.
pub fn render_heatmap(counts: &BTreeMap<NaiveDate, usize>, today: NaiveDate, weeks: usize) -> String {
    let span = heatmap_span_days(weeks);
    let start_date = today
        .checked_sub_signed(Duration::days(span - 1))
        .unwrap_or(NaiveDate::MIN);

    // Leading blanks align the first column on Sunday.
    let lead = start_date.weekday().num_days_from_sunday() as usize;
    let mut cells: Vec<Option<NaiveDate>> = vec![None; lead];
    cells.extend(crate::core::days_inclusive(start_date, today).map(Some));

    let columns = cells.len().div_ceil(7);
    let day_labels = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
    let mut lines = Vec::new();

    for (row, label) in day_labels.iter().enumerate() {
        let mut line = format!("{label} ");
        for column in 0..columns {
            let cell = cells.get(column * 7 + row).copied().flatten();
            match cell {
                Some(date) => line.push(heat_cell(counts.get(&date).copied().unwrap_or(0))),
                None => line.push(' '),
            }
        }
        lines.push(line.trim_end().to_string());
    }

    let total: usize = counts
        .iter()
        .filter(|(date, _)| **date >= start_date && **date <= today)
        .map(|(_, c)| c)
        .sum();

    lines.push(String::new());
    lines.push(format!(
        "{total} completed from {start_date} to {today}    · = 0  ░ = 1  ▒ = 2-3  ▓ = 4-5  █ = 6+"
    ));

    lines.join("\n")
}

/// Render a simple progress bar for a 0-100 percentage.
pub fn render_progress_bar(percentage: f64, width: usize) -> String {
    let progress = (percentage / 100.0).clamp(0.0, 1.0);
    let filled = ((progress * width as f64) as usize).min(width);
    let empty = width - filled;

    let bar = format!(
        "[{}{}]",
        FULL_BLOCK.to_string().repeat(filled),
        "░".repeat(empty)
    );

    format!("{} {:.0}%", bar, progress * 100.0)
}

/// Render a summary box with key metrics.
///
/// # Arguments
///
/// * `title` - Box title
/// * `items` - Vec of (label, value) pairs
pub fn render_summary_box(title: &str, items: &[(&str, String)]) -> String {
    let width_of = |s: &str| s.chars().count();
    let max_label_len = items.iter().map(|(l, _)| width_of(l)).max().unwrap_or(0);
    let max_value_len = items.iter().map(|(_, v)| width_of(v)).max().unwrap_or(0);
    let content_width = max_label_len + max_value_len + 3; // " : "
    let box_width = content_width.max(width_of(title)) + 4;

    let mut lines = Vec::new();

    lines.push(format!("┌{}┐", "─".repeat(box_width)));

    let title_padding = (box_width - width_of(title)) / 2;
    lines.push(format!(
        "│{}{}{}│",
        " ".repeat(title_padding),
        title,
        " ".repeat(box_width - title_padding - width_of(title))
    ));

    lines.push(format!("├{}┤", "─".repeat(box_width)));

    for (label, value) in items {
        let item_str = format!("{label:>max_label_len$} : {value}");
        let padding = box_width.saturating_sub(width_of(&item_str) + 2);
        lines.push(format!("│ {}{} │", item_str, " ".repeat(padding)));
    }

    lines.push(format!("└{}┘", "─".repeat(box_width)));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::stats::test_support::date;

    #[test]
    fn test_render_sparkline() {
        let values = [0, 2, 5, 3, 8, 4, 1];
        let sparkline = render_sparkline(&values);
        assert_eq!(sparkline.chars().count(), 7);
        assert!(sparkline.starts_with(' '));
        assert!(sparkline.contains('▇'));
    }

    #[test]
    fn test_render_sparkline_empty() {
        assert!(render_sparkline(&[]).is_empty());
    }

    #[test]
    fn test_render_bar_chart() {
        let data = vec![
            ("Aprender Rust".to_string(), 90),
            ("Correr".to_string(), 30),
            ("Leer".to_string(), 0),
        ];
        let chart = render_bar_chart(&data, 8, 10, crate::core::format_minutes);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Apren..."));
        assert!(lines[0].contains("██████████"));
        assert!(lines[0].ends_with("01:30"));
        assert!(lines[2].ends_with("00:00"));
    }

    #[test]
    fn test_bar_chart_truncates_multibyte_labels() {
        let data = vec![("Señales de éxito".to_string(), 1)];
        let chart = render_bar_chart(&data, 6, 4, |v| v.to_string());
        assert!(chart.starts_with("Señ..."));
    }

    #[test]
    fn test_render_progress_bar() {
        assert!(render_progress_bar(50.0, 20).contains("50%"));
        assert!(render_progress_bar(100.0, 20).contains("100%"));
        assert!(render_progress_bar(0.0, 20).contains("0%"));
        assert!(render_progress_bar(250.0, 10).contains("[██████████]"));
    }

    #[test]
    fn test_render_summary_box() {
        let items = [
            ("Tasks", "42".to_string()),
            ("Completed", "35".to_string()),
        ];
        let box_str = render_summary_box("Summary", &items);
        assert!(box_str.contains("Summary"));
        assert!(box_str.contains("42"));
        assert!(box_str.contains("35"));
    }

    #[test]
    fn test_heatmap_rows_and_levels() {
        let today = date("2024-06-15"); // Saturday
        let mut counts = BTreeMap::new();
        counts.insert(date("2024-06-15"), 6);
        counts.insert(date("2024-06-09"), 1); // Sunday

        let map = render_heatmap(&counts, today, 2);
        let lines: Vec<&str> = map.lines().collect();
        assert!(lines[0].starts_with("Sun"));
        assert!(lines[6].starts_with("Sat"));
        assert!(lines[0].ends_with('░'));
        assert!(lines[6].ends_with('█'));
        assert!(map.contains("7 completed from 2024-06-02 to 2024-06-15"));
    }

    #[test]
    fn test_heatmap_never_exceeds_window() {
        let today = date("2024-06-15");
        let mut counts = BTreeMap::new();
        counts.insert(today - Duration::days(400), 3);
        let map = render_heatmap(&counts, today, 100);
        assert!(map.contains("0 completed"));
    }

    #[test]
    fn test_heatmap_huge_week_count_is_capped() {
        let today = date("2024-06-15");
        let map = render_heatmap(&BTreeMap::new(), today, usize::MAX);
        assert!(map.contains("0 completed from 2023-06-17 to 2024-06-15"));
        assert_eq!(heatmap_span_days(usize::MAX), CONSISTENCY_WINDOW_DAYS);
        assert_eq!(heatmap_span_days(0), 7);
        assert_eq!(heatmap_span_days(4), 28);
    }
}
