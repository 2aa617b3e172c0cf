//! Timer controller: the countdown state machine.
//!
//! ```text
//!   Idle ──start──▶ Running ──tick(0)──▶ Finished
//!    ▲               │  ▲                  │
//!    │           pause  start/resume       │
//!    │               ▼  │                  │
//!    └───reset──── Paused                  │
//!    └───────────────reset─────────────────┘
//! ```
//!
//! The controller owns the countdown, the input surface and the single tick
//! loop. Every mutation goes through one of its operations; observers are
//! told about transitions through a [`TimerEvent`] channel.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::error::TimerError;
use super::tick::{Tick, TickLoop};
use super::view::TimerView;
use crate::completion::CompletionSink;
use crate::notification::{COMPLETION_BODY, COMPLETION_TITLE};
use crate::preferences::PreferenceStore;
use crate::types::{
    DurationInput, DurationUnit, PreferenceRecord, TimerConfig, TimerPhase, TimerSettings,
    TimerState,
};

// ============================================================================
// TimerEvent
// ============================================================================

/// Transitions reported to the output surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// A fresh countdown started
    Started {
        /// Length of the run
        total_seconds: u32,
    },
    /// Countdown paused
    Paused {
        /// Seconds left at the moment of pausing
        remaining_seconds: u32,
    },
    /// Countdown resumed from pause
    Resumed {
        /// Seconds left at the moment of resuming
        remaining_seconds: u32,
    },
    /// Back to idle
    Reset,
    /// One second elapsed
    Tick {
        /// Seconds left after this tick
        remaining_seconds: u32,
    },
    /// Countdown reached zero
    Finished,
}

// ============================================================================
// Outcomes
// ============================================================================

/// Result of a successful `start()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A new run began
    Started {
        /// Length of the new run
        total_seconds: u32,
    },
    /// A paused run continued
    Resumed {
        /// Seconds left in the run
        remaining_seconds: u32,
    },
    /// The timer was already running; nothing changed
    AlreadyRunning,
}

/// Result of a `tick()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer was not running; nothing changed
    Ignored,
    /// Still counting
    Counting {
        /// Seconds left after this tick
        remaining_seconds: u32,
    },
    /// This tick finished the run
    Finished,
}

// ============================================================================
// TimerController
// ============================================================================

/// Finite-state machine owning the countdown.
pub struct TimerController {
    state: TimerState,
    input: DurationInput,
    settings: TimerSettings,
    ticker: TickLoop,
    preferences: Box<dyn PreferenceStore>,
    completion: Box<dyn CompletionSink>,
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl TimerController {
    /// Creates an idle controller.
    ///
    /// The preference store is read once here; the input surface starts
    /// from the stored record, or from `settings.default_config`.
    pub fn new(
        settings: TimerSettings,
        preferences: Box<dyn PreferenceStore>,
        completion: Box<dyn CompletionSink>,
        ticker: TickLoop,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
    ) -> Self {
        let config = preferences
            .load()
            .and_then(|record| record.to_config())
            .unwrap_or(settings.default_config);

        debug!(
            value = config.duration_value(),
            unit = config.duration_unit().as_str(),
            "Controller initialized"
        );

        Self {
            state: TimerState::new(),
            input: DurationInput::from(config),
            settings,
            ticker,
            preferences,
            completion,
            event_tx,
        }
    }

    // ------------------------------------------------------------------------
    // Input surface
    // ------------------------------------------------------------------------

    /// Replaces the duration input.
    ///
    /// Returns false (and changes nothing) while a run is in progress.
    pub fn set_input(&mut self, raw: impl Into<String>, unit: DurationUnit) -> bool {
        if !self.is_input_editable() {
            debug!("Input is locked in phase {}", self.state.phase.as_str());
            return false;
        }
        self.input = DurationInput::new(raw, unit);
        true
    }

    /// Changes only the unit of the duration input.
    pub fn set_unit(&mut self, unit: DurationUnit) -> bool {
        let raw = self.input.raw.clone();
        self.set_input(raw, unit)
    }

    /// Returns true if the input may currently be edited.
    pub fn is_input_editable(&self) -> bool {
        self.state.phase.accepts_input()
    }

    // ------------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------------

    /// Starts a new run, or resumes a paused one.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::InvalidDuration`] when starting from Idle or
    /// Finished with input that is not a positive whole number. No state
    /// changes in that case.
    pub fn start(&mut self) -> Result<StartOutcome, TimerError> {
        match self.state.phase {
            TimerPhase::Running => Ok(StartOutcome::AlreadyRunning),
            TimerPhase::Paused => {
                self.resume();
                Ok(StartOutcome::Resumed {
                    remaining_seconds: self.state.remaining_seconds,
                })
            }
            TimerPhase::Idle | TimerPhase::Finished => {
                let config = self.input.to_config().inspect_err(|e| {
                    warn!("Start rejected: {}", e);
                })?;
                self.begin(config);
                Ok(StartOutcome::Started {
                    total_seconds: config.total_seconds(),
                })
            }
        }
    }

    fn begin(&mut self, config: TimerConfig) {
        self.state.begin(&config);
        self.preferences.save(&PreferenceRecord::from(config));
        self.ticker.start();

        info!(
            total_seconds = self.state.total_seconds,
            "Countdown started ({} {})",
            config.duration_value(),
            config.duration_unit()
        );
        self.emit(TimerEvent::Started {
            total_seconds: self.state.total_seconds,
        });
    }

    /// Resumes a paused run. Returns false from any other phase.
    pub fn resume(&mut self) -> bool {
        if !self.state.is_paused() {
            return false;
        }
        self.state.resume();
        self.ticker.start();

        info!(remaining_seconds = self.state.remaining_seconds, "Countdown resumed");
        self.emit(TimerEvent::Resumed {
            remaining_seconds: self.state.remaining_seconds,
        });
        true
    }

    /// Pauses a running countdown. Returns false from any other phase.
    pub fn pause(&mut self) -> bool {
        if !self.state.is_running() {
            return false;
        }
        self.ticker.cancel();
        self.state.pause();

        info!(remaining_seconds = self.state.remaining_seconds, "Countdown paused");
        self.emit(TimerEvent::Paused {
            remaining_seconds: self.state.remaining_seconds,
        });
        true
    }

    /// Returns to idle from any phase.
    pub fn reset(&mut self) {
        self.ticker.cancel();
        self.state.reset();

        info!("Timer reset");
        self.emit(TimerEvent::Reset);
    }

    /// Delivers a tick from the tick loop.
    ///
    /// Ticks from a cancelled or replaced registration are dropped.
    pub fn on_tick(&mut self, tick: Tick) -> TickOutcome {
        if !self.ticker.is_current(tick.generation) {
            debug!(generation = tick.generation, "Stale tick dropped");
            return TickOutcome::Ignored;
        }
        self.tick()
    }

    /// Advances the countdown by one second.
    ///
    /// Does nothing unless the timer is running. The tick that reaches zero
    /// finishes the run and fires the completion side effects.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_running() {
            return TickOutcome::Ignored;
        }

        if self.state.tick() {
            self.finish();
            return TickOutcome::Finished;
        }

        let remaining_seconds = self.state.remaining_seconds;
        self.emit(TimerEvent::Tick { remaining_seconds });
        TickOutcome::Counting { remaining_seconds }
    }

    fn finish(&mut self) {
        self.ticker.cancel();

        info!(total_seconds = self.state.total_seconds, "Countdown finished");
        for _ in 0..self.settings.alert_repeats {
            self.completion.play_alert();
        }
        self.completion.notify(COMPLETION_TITLE, COMPLETION_BODY);

        self.emit(TimerEvent::Finished);
    }

    fn emit(&self, event: TimerEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("No event listener");
        }
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Returns the current phase.
    pub fn phase(&self) -> TimerPhase {
        self.state.phase
    }

    /// Returns a reference to the current countdown state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Returns the current input surface content.
    pub fn input(&self) -> &DurationInput {
        &self.input
    }

    /// Returns the controller settings.
    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    /// Elapsed fraction of the current run.
    pub fn progress(&self) -> f64 {
        self.state.elapsed_fraction()
    }

    /// Returns true if a tick loop is registered.
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_active()
    }

    /// Generation of the latest tick loop registration.
    pub fn tick_generation(&self) -> u64 {
        self.ticker.generation()
    }

    /// Projects the display view.
    pub fn view(&self) -> TimerView {
        TimerView::project(&self.state, &self.input, &self.settings.default_config)
    }
}

impl std::fmt::Debug for TimerController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerController")
            .field("state", &self.state)
            .field("input", &self.input)
            .field("settings", &self.settings)
            .field("ticker", &self.ticker)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
