//! Output formatting for quasar.
//!
//! This module provides formatters for displaying plans, goals, tasks and
//! reflections in various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::QuasarError;
use crate::model::{Goal, LifePlan, ReflectionEntry, Task};

pub use json::*;
pub use pretty::*;

/// Format tasks based on output format
///
/// # Errors
///
/// Returns `QuasarError::Parse` if JSON serialization fails.
pub fn format_tasks(
    tasks: &[&Task],
    goals: &[Goal],
    title: &str,
    format: OutputFormat,
) -> Result<String, QuasarError> {
    match format {
        OutputFormat::Pretty => Ok(format_tasks_pretty(tasks, goals, title)),
        OutputFormat::Json => format_tasks_json(tasks, title),
    }
}

/// Format a single task based on output format
///
/// # Errors
///
/// Returns `QuasarError::Parse` if JSON serialization fails.
pub fn format_task(task: &Task, goals: &[Goal], format: OutputFormat) -> Result<String, QuasarError> {
    match format {
        OutputFormat::Pretty => Ok(format_task_pretty(task, goals)),
        OutputFormat::Json => to_json(task),
    }
}

/// Format goals based on output format
///
/// # Errors
///
/// Returns `QuasarError::Parse` if JSON serialization fails.
pub fn format_goals(goals: &[Goal], format: OutputFormat) -> Result<String, QuasarError> {
    match format {
        OutputFormat::Pretty => Ok(format_goals_pretty(goals)),
        OutputFormat::Json => format_goals_json(goals),
    }
}

/// Format a single goal based on output format
///
/// # Errors
///
/// Returns `QuasarError::Parse` if JSON serialization fails.
pub fn format_goal(goal: &Goal, format: OutputFormat) -> Result<String, QuasarError> {
    match format {
        OutputFormat::Pretty => Ok(format_goal_pretty(goal)),
        OutputFormat::Json => to_json(goal),
    }
}

/// Format the life plan based on output format
///
/// # Errors
///
/// Returns `QuasarError::Parse` if JSON serialization fails.
pub fn format_plan(plan: &LifePlan, format: OutputFormat) -> Result<String, QuasarError> {
    match format {
        OutputFormat::Pretty => Ok(format_plan_pretty(plan)),
        OutputFormat::Json => format_plan_json(plan),
    }
}

/// Format reflections based on output format
///
/// # Errors
///
/// Returns `QuasarError::Parse` if JSON serialization fails.
pub fn format_reflections(
    entries: &[ReflectionEntry],
    format: OutputFormat,
) -> Result<String, QuasarError> {
    match format {
        OutputFormat::Pretty => Ok(format_reflections_pretty(entries)),
        OutputFormat::Json => format_reflections_json(entries),
    }
}
