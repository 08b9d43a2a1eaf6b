//! Pomodoro cycle: a work block followed by a break.
//!
//! When a block runs out the session switches to the other phase and
//! holds, paused, until it is started again.

use serde::Serialize;

use super::timer::Timer;

/// Default work block in minutes.
pub const DEFAULT_WORK_MINUTES: u16 = 25;
/// Default break in minutes.
pub const DEFAULT_BREAK_MINUTES: u16 = 5;

/// Which block the session is counting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    /// Title shown above the countdown.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Work => "Focus session",
            Self::Break => "Break time!",
        }
    }

    #[must_use]
    pub const fn is_break(&self) -> bool {
        matches!(self, Self::Break)
    }

    const fn other(self) -> Self {
        match self {
            Self::Work => Self::Break,
            Self::Break => Self::Work,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Work => write!(f, "work"),
            Self::Break => write!(f, "break"),
        }
    }
}

/// A work/break countdown.
#[derive(Debug, Clone)]
pub struct PomodoroSession {
    work_minutes: u16,
    break_minutes: u16,
    phase: Phase,
    timer: Timer,
    completed_work: u32,
    completed_breaks: u32,
}

impl Default for PomodoroSession {
    fn default() -> Self {
        Self::new(DEFAULT_WORK_MINUTES, DEFAULT_BREAK_MINUTES)
    }
}

impl PomodoroSession {
    /// A paused session at the start of a work block.
    #[must_use]
    pub fn new(work_minutes: u16, break_minutes: u16) -> Self {
        Self {
            work_minutes,
            break_minutes,
            phase: Phase::Work,
            timer: Timer::from_minutes(work_minutes),
            completed_work: 0,
            completed_breaks: 0,
        }
    }

    /// Start when paused, pause when running.
    pub fn toggle(&mut self) {
        if self.timer.is_running() {
            self.timer.pause();
        } else {
            self.timer.start();
        }
    }

    /// Back to a paused, full work block. Completed counts are kept.
    pub fn reset(&mut self) {
        self.phase = Phase::Work;
        self.timer = Timer::from_minutes(self.work_minutes);
    }

    /// Advance one second.
    ///
    /// Returns the phase that just ran out, after switching to the next
    /// one. The next phase starts paused.
    pub fn tick(&mut self) -> Option<Phase> {
        if !self.timer.tick() {
            return None;
        }

        let finished = self.phase;
        match finished {
            Phase::Work => self.completed_work += 1,
            Phase::Break => self.completed_breaks += 1,
        }
        self.phase = finished.other();
        self.timer = Timer::from_minutes(self.minutes_for(self.phase));
        Some(finished)
    }

    const fn minutes_for(&self, phase: Phase) -> u16 {
        match phase {
            Phase::Work => self.work_minutes,
            Phase::Break => self.break_minutes,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    #[must_use]
    pub const fn remaining_seconds(&self) -> u32 {
        self.timer.remaining_seconds()
    }

    #[must_use]
    pub fn format_remaining(&self) -> String {
        self.timer.format_remaining()
    }

    #[must_use]
    pub const fn work_minutes(&self) -> u16 {
        self.work_minutes
    }

    #[must_use]
    pub const fn break_minutes(&self) -> u16 {
        self.break_minutes
    }

    /// Work blocks that ran to 00:00.
    #[must_use]
    pub const fn completed_work(&self) -> u32 {
        self.completed_work
    }

    /// Breaks that ran to 00:00.
    #[must_use]
    pub const fn completed_breaks(&self) -> u32 {
        self.completed_breaks
    }
}
