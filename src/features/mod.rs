//! Feature implementations for quasar.
//!
//! - Statistics engine and charts
//! - Scheduling conflicts and today's tasks
//! - Month calendar
//! - Reflection journal
//! - Pomodoro focus timer

pub mod calendar;
pub mod focus;
pub mod reflection;
pub mod schedule;
pub mod stats;
