//! Interactive timer session.
//!
//! The session owns the [`TimerController`] and is the only place that
//! mutates it. One `select!` loop multiplexes:
//! - command lines from the input stream
//! - ticks from the tick loop
//! - controller events (rendered to the display)
//! - the delayed terminal title revert
//! - Ctrl-C

use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::display::{Display, APP_TITLE, FINISHED_TITLE, TITLE_REVERT_DELAY};
use crate::completion::CompletionSink;
use crate::preferences::PreferenceStore;
use crate::timer::{StartOutcome, Tick, TickLoop, TimerController, TimerError, TimerEvent};
use crate::types::{DurationUnit, TimerPhase, TimerSettings};

// ============================================================================
// SessionOptions
// ============================================================================

/// Behaviour switches of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Show the progress bar next to the clock
    pub show_progress: bool,
    /// Start the countdown as soon as the session opens
    pub start_immediately: bool,
    /// Leave the session once the countdown finishes
    pub exit_on_finish: bool,
    /// Stdout is a terminal: enables color and title updates
    pub color: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            show_progress: true,
            start_immediately: false,
            exit_on_finish: false,
            color: false,
        }
    }
}

// ============================================================================
// SessionCommand
// ============================================================================

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Start, or resume when paused
    Start,
    /// Pause the countdown
    Pause,
    /// Back to idle
    Reset,
    /// Replace the duration input
    Set {
        /// Raw magnitude, validated only on start
        value: String,
        /// New unit; the current one is kept when absent
        unit: Option<DurationUnit>,
    },
    /// Change only the unit
    Unit(DurationUnit),
    /// Print the clock line
    Status,
    /// Print the command summary
    Help,
    /// Leave the session
    Quit,
    /// Blank line
    Empty,
}

impl SessionCommand {
    /// Parses one input line.
    ///
    /// # Errors
    ///
    /// Returns a message suitable for display when the line is not a known
    /// command or its arguments are malformed.
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(Self::Empty);
        };
        let args: Vec<&str> = words.collect();

        let command = match head.to_ascii_lowercase().as_str() {
            "start" | "s" => Self::Start,
            "pause" | "p" => Self::Pause,
            "reset" | "r" => Self::Reset,
            "status" => Self::Status,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            "set" => {
                return match args.as_slice() {
                    [value] => Ok(Self::Set {
                        value: (*value).to_string(),
                        unit: None,
                    }),
                    [value, unit] => Ok(Self::Set {
                        value: (*value).to_string(),
                        unit: Some(unit.parse()?),
                    }),
                    _ => Err("usage: set <value> [minutes|seconds]".to_string()),
                };
            }
            "unit" => {
                return match args.as_slice() {
                    [unit] => Ok(Self::Unit(unit.parse()?)),
                    _ => Err("usage: unit <minutes|seconds>".to_string()),
                };
            }
            other => return Err(format!("unknown command '{}' (type 'help')", other)),
        };

        if !args.is_empty() {
            return Err(format!("'{}' takes no arguments", head));
        }
        Ok(command)
    }
}

/// Whether the session keeps going after handling an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading input
    Continue,
    /// Leave the session
    Quit,
}

// ============================================================================
// Session
// ============================================================================

/// A running timer session bound to one controller.
pub struct Session {
    controller: TimerController,
    display: Display,
    options: SessionOptions,
    tick_rx: mpsc::UnboundedReceiver<Tick>,
    event_rx: mpsc::UnboundedReceiver<TimerEvent>,
    title_tx: mpsc::UnboundedSender<u64>,
    title_rx: mpsc::UnboundedReceiver<u64>,
    title_revert_delay: Duration,
    /// Bumped on every finish; only the latest revert applies
    title_generation: u64,
    exit_pending: bool,
}

impl Session {
    /// Wires a controller with the given collaborators.
    pub fn new(
        settings: TimerSettings,
        preferences: Box<dyn PreferenceStore>,
        completion: Box<dyn CompletionSink>,
        tick_period: Duration,
        options: SessionOptions,
    ) -> Self {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (title_tx, title_rx) = mpsc::unbounded_channel();

        let controller = TimerController::new(
            settings,
            preferences,
            completion,
            TickLoop::new(tick_tx, tick_period),
            event_tx,
        );

        Self {
            controller,
            display: Display::new(options.show_progress, options.color),
            options,
            tick_rx,
            event_rx,
            title_tx,
            title_rx,
            title_revert_delay: TITLE_REVERT_DELAY,
            title_generation: 0,
            exit_pending: false,
        }
    }

    /// Overrides the initial input for this session only.
    pub fn with_initial_input(mut self, duration: Option<u32>, unit: Option<DurationUnit>) -> Self {
        match (duration, unit) {
            (Some(value), unit) => {
                let unit = unit.unwrap_or(self.controller.input().unit);
                self.controller.set_input(value.to_string(), unit);
            }
            (None, Some(unit)) => {
                self.controller.set_unit(unit);
            }
            (None, None) => {}
        }
        self
    }

    /// Returns the controller.
    pub fn controller(&self) -> &TimerController {
        &self.controller
    }

    /// Handles one parsed command.
    pub fn apply(&mut self, command: SessionCommand) -> Flow {
        debug!(?command, "Session command");
        match command {
            SessionCommand::Start => match self.controller.start() {
                Ok(StartOutcome::AlreadyRunning) => Display::show_message("Already running"),
                Ok(_) => {}
                Err(e) => Display::show_timer_error(&e),
            },
            SessionCommand::Pause => {
                if !self.controller.pause() {
                    Display::show_message("Not running");
                }
            }
            SessionCommand::Reset => self.controller.reset(),
            SessionCommand::Set { value, unit } => {
                let unit = unit.unwrap_or(self.controller.input().unit);
                if self.controller.set_input(value, unit) {
                    self.display.show_view(&self.controller.view());
                } else {
                    Self::show_input_locked();
                }
            }
            SessionCommand::Unit(unit) => {
                if self.controller.set_unit(unit) {
                    self.display.show_view(&self.controller.view());
                } else {
                    Self::show_input_locked();
                }
            }
            SessionCommand::Status => self.display.show_view(&self.controller.view()),
            SessionCommand::Help => Display::show_help(),
            SessionCommand::Quit => return Flow::Quit,
            SessionCommand::Empty => {}
        }
        Flow::Continue
    }

    fn show_input_locked() {
        Display::show_error("the duration can only be changed while the timer is stopped (try 'reset')");
    }

    /// Handles one controller event.
    fn handle_event(&mut self, event: TimerEvent) {
        self.display.show_view(&self.controller.view());

        match event {
            TimerEvent::Finished => {
                self.display.set_title(FINISHED_TITLE);

                self.title_generation += 1;
                let generation = self.title_generation;
                let title_tx = self.title_tx.clone();
                let delay = self.title_revert_delay;
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = title_tx.send(generation);
                });

                if self.options.exit_on_finish {
                    self.exit_pending = true;
                }
            }
            // A new run cancels the pending exit of the previous one
            TimerEvent::Started { .. } | TimerEvent::Reset => {
                self.exit_pending = false;
            }
            _ => {}
        }
    }

    /// Handles a title revert scheduled by a finish. Returns true if the
    /// session should end.
    fn revert_title(&mut self, generation: u64) -> bool {
        if generation != self.title_generation {
            debug!(generation, "Stale title revert ignored");
            return false;
        }
        self.display.set_title(APP_TITLE);
        self.exit_pending && self.controller.phase() == TimerPhase::Finished
    }

    /// Runs the session until quit, Ctrl-C, or finish with `exit_on_finish`.
    ///
    /// The session keeps running after `input` reaches end of file.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::InvalidDuration`] if the session was asked to
    /// start immediately with an invalid duration.
    pub async fn run<R>(&mut self, input: R) -> Result<(), TimerError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut input_open = true;

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        self.display.set_title(APP_TITLE);
        self.display.show_view(&self.controller.view());
        if self.options.start_immediately {
            self.controller.start()?;
        } else {
            Display::show_message("Type 'start' to begin, 'help' for commands.");
        }

        loop {
            tokio::select! {
                line = lines.next_line(), if input_open => match line {
                    Ok(Some(line)) => match SessionCommand::parse(&line) {
                        Ok(command) => {
                            if self.apply(command) == Flow::Quit {
                                break;
                            }
                        }
                        Err(message) => Display::show_error(&message),
                    },
                    Ok(None) => {
                        debug!("Input closed");
                        input_open = false;
                    }
                    Err(e) => {
                        warn!("Failed to read input: {}", e);
                        input_open = false;
                    }
                },

                Some(tick) = self.tick_rx.recv() => {
                    self.controller.on_tick(tick);
                },

                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                },

                Some(generation) = self.title_rx.recv() => {
                    if self.revert_title(generation) {
                        break;
                    }
                },

                _ = &mut ctrl_c => {
                    info!("Interrupted");
                    break;
                }
            }
        }

        info!("Session closed");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
