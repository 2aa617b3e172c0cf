//! Display projection of the timer.
//!
//! A [`TimerView`] is a pure function of the timer state and the current
//! input surface; building one has no side effects.

use serde::Serialize;

use crate::types::{DurationInput, TimerConfig, TimerPhase, TimerState};

/// What the output surface shows for a given state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimerView {
    /// Phase the view was projected from
    pub phase: TimerPhase,
    /// Minutes field of the clock
    pub minutes: u32,
    /// Seconds field of the clock
    pub seconds: u32,
    /// Elapsed fraction of the current run, in `[0.0, 1.0]`
    pub progress: f64,
}

impl TimerView {
    /// Projects a view from the state and input surface.
    ///
    /// `fallback` is shown while idle if the input cannot be parsed.
    pub fn project(state: &TimerState, input: &DurationInput, fallback: &TimerConfig) -> Self {
        let (minutes, seconds) = match state.phase {
            TimerPhase::Running | TimerPhase::Paused => split_seconds(state.remaining_seconds),
            TimerPhase::Idle => input
                .to_config()
                .unwrap_or(*fallback)
                .display_parts(),
            TimerPhase::Finished => (0, 0),
        };

        Self {
            phase: state.phase,
            minutes,
            seconds,
            progress: state.elapsed_fraction(),
        }
    }

    /// Formats the clock as `MM:SS`.
    pub fn clock(&self) -> String {
        format!("{:02}:{:02}", self.minutes, self.seconds)
    }

    /// Progress as a whole percentage in `0..=100`.
    pub fn progress_percent(&self) -> u8 {
        (self.progress.clamp(0.0, 1.0) * 100.0).round() as u8
    }

    /// Status text for the phase.
    pub fn status_text(&self) -> &'static str {
        self.phase.status_text()
    }

    /// True while the "running" styling applies.
    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    /// True while the "finished" styling applies.
    pub fn is_finished(&self) -> bool {
        self.phase == TimerPhase::Finished
    }
}

/// Splits a number of seconds into (minutes, seconds).
pub fn split_seconds(total_seconds: u32) -> (u32, u32) {
    (total_seconds / 60, total_seconds % 60)
}
