//! One-second countdown used by the pomodoro cycle.

use serde::Serialize;

/// Where a countdown stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// Counting down
    Running,
    /// Holding its remaining time
    Paused,
    /// Reached 00:00
    Completed,
}

/// A countdown in whole seconds.
#[derive(Debug, Clone)]
pub struct Timer {
    total_seconds: u32,
    remaining_seconds: u32,
    state: TimerState,
}

impl Timer {
    /// A paused countdown of `minutes` minutes.
    #[must_use]
    pub fn from_minutes(minutes: u16) -> Self {
        Self::from_seconds(u32::from(minutes) * 60)
    }

    /// A paused countdown of `seconds` seconds.
    #[must_use]
    pub const fn from_seconds(seconds: u32) -> Self {
        Self {
            total_seconds: seconds,
            remaining_seconds: seconds,
            state: TimerState::Paused,
        }
    }

    /// Start or resume. A finished countdown stays finished.
    pub fn start(&mut self) {
        if self.remaining_seconds > 0 {
            self.state = TimerState::Running;
        }
    }

    pub fn pause(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Paused;
        }
    }

    /// Advance one second. Returns true on the tick that reaches zero.
    pub fn tick(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.state = TimerState::Completed;
            true
        } else {
            false
        }
    }

    /// Back to the full duration, paused.
    pub fn reset(&mut self) {
        self.remaining_seconds = self.total_seconds;
        self.state = TimerState::Paused;
    }

    #[must_use]
    pub const fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    #[must_use]
    pub const fn state(&self) -> TimerState {
        self.state
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Remaining time as `MM:SS`.
    #[must_use]
    pub fn format_remaining(&self) -> String {
        format_mmss(self.remaining_seconds)
    }
}

/// Format seconds as `MM:SS`. Minutes keep counting past 59.
#[must_use]
pub fn format_mmss(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_timer_is_paused_and_full() {
        let timer = Timer::from_minutes(25);
        assert_eq!(timer.state(), TimerState::Paused);
        assert_eq!(timer.remaining_seconds(), 1500);
        assert_eq!(timer.format_remaining(), "25:00");
    }

    #[test]
    fn test_tick_only_counts_while_running() {
        let mut timer = Timer::from_seconds(3);
        assert!(!timer.tick());
        assert_eq!(timer.remaining_seconds(), 3);

        timer.start();
        assert!(!timer.tick());
        timer.pause();
        assert!(!timer.tick());
        assert_eq!(timer.remaining_seconds(), 2);
    }

    #[test]
    fn test_tick_reports_completion_once() {
        let mut timer = Timer::from_seconds(2);
        timer.start();
        assert!(!timer.tick());
        assert!(timer.tick());
        assert_eq!(timer.state(), TimerState::Completed);
        assert!(!timer.tick());
        timer.start();
        assert!(!timer.is_running());
    }

    #[test]
    fn test_reset_restores_duration() {
        let mut timer = Timer::from_minutes(1);
        timer.start();
        timer.tick();
        timer.reset();
        assert_eq!(timer.remaining_seconds(), 60);
        assert_eq!(timer.state(), TimerState::Paused);
    }

    #[test]
    fn test_format_mmss() {
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(59), "00:59");
        assert_eq!(format_mmss(300), "05:00");
        assert_eq!(format_mmss(7260), "121:00");
    }
}
