//! Pomodoro focus timer.
//!
//! - `timer`: a pausable one-second countdown
//! - `session`: the work/break cycle built on it

pub mod session;
pub mod timer;

pub use session::{Phase, PomodoroSession, DEFAULT_BREAK_MINUTES, DEFAULT_WORK_MINUTES};
pub use timer::{format_mmss, Timer, TimerState};
