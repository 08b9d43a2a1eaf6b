//! Journal reflections.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::model::ReflectionEntry;

/// Questions offered as a starting point for the day's entry.
pub const REFLECTION_PROMPTS: [&str; 10] = [
    "What was the biggest challenge you faced today and how did you handle it?",
    "What small win or moment of joy did you celebrate today?",
    "What did you learn about yourself or your goals today?",
    "If you could do one thing differently today, what would it be and why?",
    "What are you most grateful for right now?",
    "What did you do today that brings you closer to the person you want to be?",
    "Describe a moment when you felt completely focused or 'in the zone'.",
    "What unexpected obstacle came up and what strategy did you use to overcome it?",
    "How did you apply your core values in your actions today?",
    "Which conversation or interaction today left you thinking?",
];

/// Prompt for `day`. The same day always gets the same prompt.
#[must_use]
pub fn prompt_for(day: NaiveDate) -> &'static str {
    let index = day.num_days_from_ce().unsigned_abs() as usize % REFLECTION_PROMPTS.len();
    REFLECTION_PROMPTS[index]
}

/// Entries grouped by `YYYY-MM`, newest month first, newest entry first
/// within a month.
#[must_use]
pub fn group_by_month(entries: &[ReflectionEntry]) -> Vec<(String, Vec<&ReflectionEntry>)> {
    let mut months: BTreeMap<String, Vec<&ReflectionEntry>> = BTreeMap::new();
    for entry in entries {
        let key = entry.date.format("%Y-%m").to_string();
        months.entry(key).or_default().push(entry);
    }

    months
        .into_iter()
        .rev()
        .map(|(key, mut items)| {
            items.sort_by(|a, b| b.date.cmp(&a.date));
            (key, items)
        })
        .collect()
}
