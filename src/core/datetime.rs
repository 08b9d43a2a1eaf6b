//! Date and time utilities.
//!
//! Calendar dates are handled as [`NaiveDate`] values built directly from
//! their year/month/day fields, so a `YYYY-MM-DD` string always lands on the
//! same calendar day no matter which timezone the process runs in.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc, Weekday};

/// Parse a `YYYY-MM-DD` calendar date into local midnight of that day.
///
/// Surrounding whitespace is ignored. Returns `None` for empty input or a
/// date that does not exist (e.g. `2023-02-30`).
#[must_use]
pub fn normalize_local_date(input: &str) -> Option<NaiveDate> {
    let mut parts = input.trim().splitn(3, '-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse an `HH:MM` (or `HH:MM:SS`) time of day.
#[must_use]
pub fn parse_time_of_day(input: &str) -> Option<NaiveTime> {
    let input = input.trim();
    NaiveTime::parse_from_str(input, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M:%S"))
        .ok()
}

/// Calendar day on which a completion timestamp falls (UTC date portion).
#[must_use]
pub fn completion_day(timestamp: DateTime<Utc>) -> NaiveDate {
    timestamp.date_naive()
}

/// Iterate every day from `start` through `end`, inclusive.
///
/// An inverted range (`end < start`) yields nothing.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}

/// Whole days from `from` to `to` (negative when `to` is earlier).
#[must_use]
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// ISO-8601 week key of a date, formatted `YYYY-Www`.
///
/// The year is the ISO week-numbering year, which differs from the
/// calendar year around New Year (2021-01-01 belongs to `2020-W53`).
#[must_use]
pub fn iso_week_key(date: NaiveDate) -> String {
    let week = date.iso_week();
    format!("{}-W{:02}", week.year(), week.week())
}

/// Format a minute count as `HH:MM`.
#[must_use]
pub fn format_minutes(total_minutes: u64) -> String {
    if total_minutes == 0 {
        return "00:00".to_string();
    }
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}

/// Parse a date argument given on the command line.
///
/// Supports:
/// - `today`, `tomorrow`, `yesterday`
/// - `in 3 days`, `in 2 weeks`
/// - weekday names (`friday`, `next monday`), resolved relative to `today`
/// - `2024-12-15`
#[must_use]
pub fn parse_date_arg(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let input = input.trim().to_lowercase();

    match input.as_str() {
        "today" => return Some(today),
        "tomorrow" => return today.succ_opt(),
        "yesterday" => return today.pred_opt(),
        _ => {},
    }

    if let Some(date) = parse_relative_offset(&input, today) {
        return Some(date);
    }

    if let Some(date) = parse_weekday(&input, today) {
        return Some(date);
    }

    normalize_local_date(&input)
}

/// Parse "in X days/weeks" patterns. Offsets past the calendar range give `None`.
fn parse_relative_offset(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split_whitespace().collect();

    if parts.len() == 3 && parts[0] == "in" {
        let amount: i64 = parts[1].parse().ok()?;
        let days = match parts[2].trim_end_matches('s') {
            "day" => amount,
            "week" => amount.checked_mul(7)?,
            _ => return None,
        };
        return today.checked_add_signed(Duration::try_days(days)?);
    }

    None
}

/// Parse weekday names into the next occurrence after `today`.
fn parse_weekday(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let (is_next, day_str) = input
        .strip_prefix("next ")
        .map_or((false, input), |rest| (true, rest));

    let target = match day_str {
        "monday" | "mon" => Weekday::Mon,
        "tuesday" | "tue" | "tues" => Weekday::Tue,
        "wednesday" | "wed" => Weekday::Wed,
        "thursday" | "thu" | "thurs" => Weekday::Thu,
        "friday" | "fri" => Weekday::Fri,
        "saturday" | "sat" => Weekday::Sat,
        "sunday" | "sun" => Weekday::Sun,
        _ => return None,
    };

    let mut days_until = (i64::from(target.num_days_from_monday())
        - i64::from(today.weekday().num_days_from_monday())
        + 7)
        % 7;

    if days_until == 0 || is_next {
        days_until += 7;
    }

    today.checked_add_signed(Duration::try_days(days_until)?)
}
