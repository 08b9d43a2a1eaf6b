//! JSON output formatting for quasar.
//!
//! Records are emitted in the same camelCase shape they are stored in.

use serde::Serialize;
use serde_json::json;

use crate::error::QuasarError;
use crate::features::reflection::group_by_month;
use crate::model::{Goal, LifePlan, ReflectionEntry, Task};

/// Format tasks as JSON
///
/// # Errors
///
/// Returns `QuasarError::Parse` if JSON serialization fails.
pub fn format_tasks_json(tasks: &[&Task], list_name: &str) -> Result<String, QuasarError> {
    let output = json!({
        "list": list_name,
        "count": tasks.len(),
        "items": tasks
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format goals as JSON
///
/// # Errors
///
/// Returns `QuasarError::Parse` if JSON serialization fails.
pub fn format_goals_json(goals: &[Goal]) -> Result<String, QuasarError> {
    let output = json!({
        "count": goals.len(),
        "items": goals
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the life plan as JSON
///
/// # Errors
///
/// Returns `QuasarError::Parse` if JSON serialization fails.
pub fn format_plan_json(plan: &LifePlan) -> Result<String, QuasarError> {
    Ok(serde_json::to_string_pretty(plan)?)
}

/// Format reflections as JSON, grouped by month
///
/// # Errors
///
/// Returns `QuasarError::Parse` if JSON serialization fails.
pub fn format_reflections_json(entries: &[ReflectionEntry]) -> Result<String, QuasarError> {
    let months: Vec<_> = group_by_month(entries)
        .into_iter()
        .map(|(month, items)| json!({ "month": month, "items": items }))
        .collect();
    let output = json!({
        "count": entries.len(),
        "months": months
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `QuasarError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, QuasarError> {
    Ok(serde_json::to_string_pretty(value)?)
}
