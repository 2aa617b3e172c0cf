//! Display utilities for the tomato-clock CLI.
//!
//! This module provides formatted output for:
//! - The clock line (time, status, progress bar)
//! - The terminal title
//! - Error and informational messages

use std::path::Path;
use std::time::Duration;

use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::SetTitle;
use tracing::debug;

use crate::timer::{TimerError, TimerView};
use crate::types::PreferenceRecord;

// ============================================================================
// Constants
// ============================================================================

/// Terminal title while the session is open
pub const APP_TITLE: &str = "Pomodoro Timer";

/// Terminal title shown when time is up
pub const FINISHED_TITLE: &str = "⏰ Time's up! - Pomodoro Timer";

/// How long the finished title stays before reverting
pub const TITLE_REVERT_DELAY: Duration = Duration::from_secs(3);

/// Number of cells in the progress bar
const PROGRESS_WIDTH: usize = 20;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
#[derive(Debug, Clone, Copy)]
pub struct Display {
    show_progress: bool,
    color: bool,
}

impl Display {
    /// Creates a display. `color` also enables terminal title updates.
    pub fn new(show_progress: bool, color: bool) -> Self {
        Self {
            show_progress,
            color,
        }
    }

    /// Renders the clock line for a view.
    ///
    /// ```text
    /// 24:59  Running...  [#-------------------]   0%
    /// ```
    pub fn render_line(&self, view: &TimerView) -> String {
        let mut line = format!("{}  {}", view.clock(), view.status_text());
        if self.show_progress {
            line.push_str("  ");
            line.push_str(&Self::progress_bar(view));
        }

        if !self.color {
            return line;
        }
        if view.is_running() {
            line.green().to_string()
        } else if view.is_finished() {
            line.red().to_string()
        } else {
            line
        }
    }

    /// Prints the clock line.
    pub fn show_view(&self, view: &TimerView) {
        println!("{}", self.render_line(view));
    }

    /// Renders the progress bar, e.g. `[#####---------------]  25%`.
    pub fn progress_bar(view: &TimerView) -> String {
        let filled = (view.progress.clamp(0.0, 1.0) * PROGRESS_WIDTH as f64).floor() as usize;
        format!(
            "[{}{}] {:>3}%",
            "#".repeat(filled),
            "-".repeat(PROGRESS_WIDTH - filled),
            view.progress_percent()
        )
    }

    /// Sets the terminal title. Does nothing unless stdout is a terminal.
    pub fn set_title(&self, title: &str) {
        if !self.color {
            return;
        }
        let mut stdout = std::io::stdout();
        if let Err(e) = execute!(stdout, SetTitle(title)) {
            debug!("Failed to set terminal title: {}", e);
        }
    }

    /// Shows an informational message.
    pub fn show_message(message: &str) {
        println!("{}", message);
    }

    /// Shows a rejected duration.
    pub fn show_timer_error(error: &TimerError) {
        Self::show_error(&error.to_string());
        eprintln!("  hint: {}", error.suggestion());
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }

    /// Shows the session command summary.
    pub fn show_help() {
        println!("Commands:");
        println!("  start, s                 start, or resume when paused");
        println!("  pause, p                 pause the countdown");
        println!("  reset, r                 stop and return to the configured duration");
        println!("  set <value> [unit]       set the duration (unit: minutes or seconds)");
        println!("  unit <minutes|seconds>   change the duration unit");
        println!("  status                   show the current time");
        println!("  help, h, ?               show this help");
        println!("  quit, q, exit            leave");
    }

    /// Shows the saved preference, or a note when none exists.
    pub fn show_preference(record: Option<&PreferenceRecord>, path: &Path) -> anyhow::Result<()> {
        match record {
            Some(record) => println!("{}", serde_json::to_string_pretty(record)?),
            None => println!("No saved preference ({})", path.display()),
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TimerPhase;

    fn view(phase: TimerPhase, minutes: u32, seconds: u32, progress: f64) -> TimerView {
        TimerView {
            phase,
            minutes,
            seconds,
            progress,
        }
    }

    // ------------------------------------------------------------------------
    // Progress Bar Tests
    // ------------------------------------------------------------------------

    mod progress_bar_tests {
        use super::*;

        #[test]
        fn test_progress_bar_empty() {
            let v = view(TimerPhase::Idle, 25, 0, 0.0);
            assert_eq!(Display::progress_bar(&v), "[--------------------]   0%");
        }

        #[test]
        fn test_progress_bar_quarter() {
            let v = view(TimerPhase::Running, 18, 45, 0.25);
            assert_eq!(Display::progress_bar(&v), "[#####---------------]  25%");
        }

        #[test]
        fn test_progress_bar_full() {
            let v = view(TimerPhase::Finished, 0, 0, 1.0);
            assert_eq!(Display::progress_bar(&v), "[####################] 100%");
        }

        #[test]
        fn test_progress_bar_clamps() {
            let v = view(TimerPhase::Running, 0, 1, 1.5);
            assert_eq!(Display::progress_bar(&v), "[####################] 100%");
        }
    }

    // ------------------------------------------------------------------------
    // Line Rendering Tests
    // ------------------------------------------------------------------------

    mod render_tests {
        use super::*;

        #[test]
        fn test_render_idle_plain() {
            let display = Display::new(false, false);
            let v = view(TimerPhase::Idle, 25, 0, 0.0);
            assert_eq!(display.render_line(&v), "25:00  Ready");
        }

        #[test]
        fn test_render_with_progress() {
            let display = Display::new(true, false);
            let v = view(TimerPhase::Paused, 1, 30, 0.5);
            assert_eq!(
                display.render_line(&v),
                "01:30  Paused  [##########----------]  50%"
            );
        }

        #[test]
        fn test_render_long_minutes() {
            let display = Display::new(false, false);
            let v = view(TimerPhase::Running, 120, 5, 0.0);
            assert_eq!(display.render_line(&v), "120:05  Running...");
        }

        #[test]
        fn test_running_is_green() {
            let display = Display::new(false, true);
            let v = view(TimerPhase::Running, 24, 59, 0.0);
            assert_eq!(
                display.render_line(&v),
                "24:59  Running...".green().to_string()
            );
        }

        #[test]
        fn test_finished_is_red() {
            let display = Display::new(false, true);
            let v = view(TimerPhase::Finished, 0, 0, 1.0);
            assert_eq!(
                display.render_line(&v),
                "00:00  Time's up!".red().to_string()
            );
        }

        #[test]
        fn test_running_without_color_is_plain() {
            let display = Display::new(false, false);
            let v = view(TimerPhase::Running, 24, 59, 0.0);
            assert_eq!(display.render_line(&v), "24:59  Running...");
        }

        #[test]
        fn test_paused_is_unstyled() {
            let display = Display::new(false, true);
            let v = view(TimerPhase::Paused, 10, 0, 0.0);
            assert_eq!(display.render_line(&v), "10:00  Paused");
        }
    }

    // ------------------------------------------------------------------------
    // Output Tests
    // ------------------------------------------------------------------------

    mod output_tests {
        use super::*;
        use crate::types::DurationUnit;

        #[test]
        fn test_set_title_without_terminal_is_noop() {
            Display::new(true, false).set_title(APP_TITLE);
        }

        #[test]
        fn test_show_messages() {
            // These verify the functions don't panic
            Display::show_message("hello");
            Display::show_error("Test error message");
            Display::show_timer_error(&TimerError::invalid_duration("-5"));
            Display::show_help();
        }

        #[test]
        fn test_show_preference() {
            let record = PreferenceRecord {
                duration_value: 25,
                duration_unit: DurationUnit::Minutes,
            };
            assert!(Display::show_preference(Some(&record), Path::new("/tmp/p.json")).is_ok());
            assert!(Display::show_preference(None, Path::new("/tmp/p.json")).is_ok());
        }
    }
}
