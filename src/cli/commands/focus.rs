//! Pomodoro timer command.
//!
//! The countdown redraws one status line every second. Keyboard input is
//! read line by line on a separate thread and arrives over a channel.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use colored::Colorize;
use serde::Serialize;

use crate::cli::args::{FocusArgs, OutputFormat};
use crate::error::QuasarError;
use crate::features::focus::{Phase, PomodoroSession};
use crate::output::to_json;

const TICK: Duration = Duration::from_secs(1);

/// A line typed while the timer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Toggle,
    Reset,
    Quit,
}

impl Control {
    /// An empty line toggles; unknown input is ignored.
    fn parse(line: &str) -> Option<Self> {
        match line.trim().to_lowercase().as_str() {
            "" | "p" | "pause" | "s" | "start" => Some(Self::Toggle),
            "r" | "reset" => Some(Self::Reset),
            "q" | "quit" | "stop" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// How a focus run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FocusSummary {
    pub work_minutes: u16,
    pub break_minutes: u16,
    pub cycles_planned: u16,
    pub cycles_completed: u32,
    pub focused_minutes: u32,
    pub stopped_early: bool,
}

/// Run the pomodoro timer until the requested cycles are done or the user
/// stops it. The countdown is drawn on `out`; the returned text is the
/// summary.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn focus(
    args: &FocusArgs,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<String, QuasarError> {
    let controls = spawn_input_reader();
    writeln!(out, "{}", "Enter: pause/resume   r: reset   q: stop".dimmed())?;

    let session = PomodoroSession::new(args.work, args.break_minutes);
    let summary = run_cycles(session, args.cycles, &controls, TICK, out)?;
    tracing::info!(
        cycles = summary.cycles_completed,
        stopped_early = summary.stopped_early,
        "focus finished"
    );
    render_summary(&summary, format)
}

fn spawn_input_reader() -> Receiver<Control> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if let Some(control) = Control::parse(&line) {
                if tx.send(control).is_err() {
                    break;
                }
            }
        }
    });
    rx
}

/// Drive `session` one `tick` at a time, applying controls as they arrive.
///
/// Once input is closed a paused countdown resumes, since nothing could
/// resume it later.
fn run_cycles(
    mut session: PomodoroSession,
    cycles: u16,
    controls: &Receiver<Control>,
    tick: Duration,
    out: &mut impl Write,
) -> Result<FocusSummary, QuasarError> {
    let mut stopped_early = false;
    session.toggle();
    draw(&session, out)?;

    while session.completed_breaks() < u32::from(cycles) {
        match controls.recv_timeout(tick) {
            Ok(Control::Toggle) => session.toggle(),
            Ok(Control::Reset) => session.reset(),
            Ok(Control::Quit) => {
                stopped_early = true;
                break;
            }
            Err(RecvTimeoutError::Timeout) => advance(&mut session, out)?,
            Err(RecvTimeoutError::Disconnected) => {
                if !session.is_running() {
                    session.toggle();
                }
                thread::sleep(tick);
                advance(&mut session, out)?;
            }
        }
        draw(&session, out)?;
    }
    writeln!(out)?;

    Ok(FocusSummary {
        work_minutes: session.work_minutes(),
        break_minutes: session.break_minutes(),
        cycles_planned: cycles,
        cycles_completed: session.completed_breaks(),
        focused_minutes: session.completed_work() * u32::from(session.work_minutes()),
        stopped_early,
    })
}

/// One second forward. A finished block rings the bell and the next block
/// starts straight away.
fn advance(session: &mut PomodoroSession, out: &mut impl Write) -> Result<(), QuasarError> {
    if let Some(finished) = session.tick() {
        let message = match finished {
            Phase::Work => "Work block done. Take a break.",
            Phase::Break => "Break over.",
        };
        writeln!(out, "\r{message:<40}\x07")?;
        session.toggle();
    }
    Ok(())
}

fn draw(session: &PomodoroSession, out: &mut impl Write) -> Result<(), QuasarError> {
    let title = match session.phase() {
        Phase::Work => session.phase().title().red().bold(),
        Phase::Break => session.phase().title().green().bold(),
    };
    let paused = if session.is_running() { "" } else { " (paused)" };
    write!(out, "\r{title}  {}{paused}   ", session.format_remaining())?;
    out.flush()?;
    Ok(())
}

fn render_summary(summary: &FocusSummary, format: OutputFormat) -> Result<String, QuasarError> {
    match format {
        OutputFormat::Json => to_json(summary),
        OutputFormat::Pretty => {
            let cycles = summary.cycles_completed;
            let plural = if cycles == 1 { "" } else { "s" };
            if summary.stopped_early {
                Ok(format!(
                    "Focus stopped after {cycles} of {} cycle{plural} ({} min focused)",
                    summary.cycles_planned, summary.focused_minutes
                )
                .yellow()
                .to_string())
            } else {
                Ok(format!(
                    "Focus complete: {cycles} cycle{plural}, {} min focused",
                    summary.focused_minutes
                )
                .green()
                .to_string())
            }
        }
    }
}
