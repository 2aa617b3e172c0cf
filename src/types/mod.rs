//! Core data types for the countdown timer.
//!
//! This module defines the data structures used for:
//! - Duration units and validated timer configuration
//! - Timer phase and countdown state
//! - The raw input surface and the persisted preference record

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::timer::TimerError;

// ============================================================================
// DurationUnit
// ============================================================================

/// Unit of the user-entered duration magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    /// Magnitude is a number of minutes
    #[default]
    Minutes,
    /// Magnitude is a number of seconds
    Seconds,
}

impl DurationUnit {
    /// Returns the string representation of the unit.
    pub fn as_str(&self) -> &'static str {
        match self {
            DurationUnit::Minutes => "minutes",
            DurationUnit::Seconds => "seconds",
        }
    }

    /// Number of seconds in one unit.
    pub fn seconds_per_unit(&self) -> u32 {
        match self {
            DurationUnit::Minutes => 60,
            DurationUnit::Seconds => 1,
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DurationUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "min" | "mins" | "minute" | "minutes" => Ok(DurationUnit::Minutes),
            "s" | "sec" | "secs" | "second" | "seconds" => Ok(DurationUnit::Seconds),
            other => Err(format!("unknown unit '{}' (use minutes or seconds)", other)),
        }
    }
}

// ============================================================================
// TimerConfig
// ============================================================================

/// A validated countdown configuration.
///
/// Can only be built through [`TimerConfig::new`] or [`TimerConfig::parse`],
/// so `total_seconds()` is always positive. Deserialization goes through
/// [`TimerConfig::new`] as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTimerConfig")]
pub struct TimerConfig {
    duration_value: u32,
    duration_unit: DurationUnit,
}

/// Unvalidated wire shape of [`TimerConfig`].
#[derive(Deserialize)]
struct RawTimerConfig {
    duration_value: u32,
    duration_unit: DurationUnit,
}

impl TryFrom<RawTimerConfig> for TimerConfig {
    type Error = TimerError;

    fn try_from(raw: RawTimerConfig) -> Result<Self, Self::Error> {
        Self::new(raw.duration_value, raw.duration_unit)
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            duration_value: 25,
            duration_unit: DurationUnit::Minutes,
        }
    }
}

impl TimerConfig {
    /// Creates a configuration from an already-numeric magnitude.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::InvalidDuration`] if the value is zero or the
    /// total number of seconds does not fit in a `u32`.
    pub fn new(duration_value: u32, duration_unit: DurationUnit) -> Result<Self, TimerError> {
        let invalid = || TimerError::invalid_duration(duration_value.to_string());

        if duration_value == 0 {
            return Err(invalid());
        }
        duration_value
            .checked_mul(duration_unit.seconds_per_unit())
            .ok_or_else(invalid)?;

        Ok(Self {
            duration_value,
            duration_unit,
        })
    }

    /// Parses free-form user input into a configuration.
    ///
    /// The trimmed text must be a complete integer literal. Non-numeric,
    /// negative, zero and overflowing values are all rejected.
    pub fn parse(raw: &str, duration_unit: DurationUnit) -> Result<Self, TimerError> {
        let trimmed = raw.trim();
        let value: i64 = trimmed
            .parse()
            .map_err(|_| TimerError::invalid_duration(trimmed))?;

        if value <= 0 {
            return Err(TimerError::invalid_duration(trimmed));
        }
        let value = u32::try_from(value).map_err(|_| TimerError::invalid_duration(trimmed))?;

        Self::new(value, duration_unit).map_err(|_| TimerError::invalid_duration(trimmed))
    }

    /// Returns the user-entered magnitude.
    pub fn duration_value(&self) -> u32 {
        self.duration_value
    }

    /// Returns the unit of the magnitude.
    pub fn duration_unit(&self) -> DurationUnit {
        self.duration_unit
    }

    /// Total countdown length in seconds.
    pub fn total_seconds(&self) -> u32 {
        self.duration_value * self.duration_unit.seconds_per_unit()
    }

    /// Splits the configured duration into display minutes and seconds.
    pub fn display_parts(&self) -> (u32, u32) {
        match self.duration_unit {
            DurationUnit::Minutes => (self.duration_value, 0),
            DurationUnit::Seconds => (self.duration_value / 60, self.duration_value % 60),
        }
    }
}

// ============================================================================
// TimerSettings
// ============================================================================

/// Behavioral knobs of the controller that are configuration, not contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSettings {
    /// Configuration used when no preference has been saved yet
    pub default_config: TimerConfig,
    /// How many times the alert is played on completion
    pub alert_repeats: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            default_config: TimerConfig::default(),
            alert_repeats: 3,
        }
    }
}

impl TimerSettings {
    /// Replaces the default configuration.
    pub fn with_default_config(mut self, config: TimerConfig) -> Self {
        self.default_config = config;
        self
    }

    /// Replaces the alert repeat count.
    pub fn with_alert_repeats(mut self, repeats: u32) -> Self {
        self.alert_repeats = repeats;
        self
    }
}

// ============================================================================
// DurationInput
// ============================================================================

/// Current content of the input surface, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationInput {
    /// Raw magnitude text as typed by the user
    pub raw: String,
    /// Selected unit
    pub unit: DurationUnit,
}

impl DurationInput {
    /// Creates an input from raw text and a unit.
    pub fn new(raw: impl Into<String>, unit: DurationUnit) -> Self {
        Self {
            raw: raw.into(),
            unit,
        }
    }

    /// Validates the input into a configuration.
    pub fn to_config(&self) -> Result<TimerConfig, TimerError> {
        TimerConfig::parse(&self.raw, self.unit)
    }
}

impl From<TimerConfig> for DurationInput {
    fn from(config: TimerConfig) -> Self {
        Self::new(config.duration_value().to_string(), config.duration_unit())
    }
}

// ============================================================================
// PreferenceRecord
// ============================================================================

/// The last user-confirmed configuration, persisted across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    /// Duration magnitude
    #[serde(rename = "pomodoroTime")]
    pub duration_value: u32,
    /// Duration unit (older records carry only the magnitude, in minutes)
    #[serde(rename = "pomodoroUnit", default)]
    pub duration_unit: DurationUnit,
}

impl PreferenceRecord {
    /// Converts the record back into a configuration.
    ///
    /// Returns `None` when the stored values are no longer valid.
    pub fn to_config(&self) -> Option<TimerConfig> {
        TimerConfig::new(self.duration_value, self.duration_unit).ok()
    }
}

impl From<TimerConfig> for PreferenceRecord {
    fn from(config: TimerConfig) -> Self {
        Self {
            duration_value: config.duration_value(),
            duration_unit: config.duration_unit(),
        }
    }
}

// ============================================================================
// TimerPhase
// ============================================================================

/// Represents the current phase of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    /// Nothing is counting; the input is editable
    #[default]
    Idle,
    /// Counting down
    Running,
    /// Countdown suspended with progress kept
    Paused,
    /// Countdown reached zero
    Finished,
}

impl TimerPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Running => "running",
            TimerPhase::Paused => "paused",
            TimerPhase::Finished => "finished",
        }
    }

    /// Returns the user-facing status text for the phase.
    pub fn status_text(&self) -> &'static str {
        match self {
            TimerPhase::Idle => "Ready",
            TimerPhase::Running => "Running...",
            TimerPhase::Paused => "Paused",
            TimerPhase::Finished => "Time's up!",
        }
    }

    /// Returns true if the duration input may be edited in this phase.
    pub fn accepts_input(&self) -> bool {
        matches!(self, TimerPhase::Idle | TimerPhase::Finished)
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// Countdown state owned by the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Current phase of the timer
    pub phase: TimerPhase,
    /// Length of the current run in seconds
    pub total_seconds: u32,
    /// Seconds left in the current run
    pub remaining_seconds: u32,
}

impl TimerState {
    /// Creates a new state in the idle phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a fresh run of the given configuration.
    pub fn begin(&mut self, config: &TimerConfig) {
        self.phase = TimerPhase::Running;
        self.total_seconds = config.total_seconds();
        self.remaining_seconds = self.total_seconds;
    }

    /// Suspends a running countdown.
    ///
    /// Only works if the timer is currently running.
    pub fn pause(&mut self) {
        if self.phase == TimerPhase::Running {
            self.phase = TimerPhase::Paused;
        }
    }

    /// Continues a paused countdown without touching the remaining time.
    pub fn resume(&mut self) {
        if self.phase == TimerPhase::Paused {
            self.phase = TimerPhase::Running;
        }
    }

    /// Returns to idle and clears the counters.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Decrements the countdown by one second.
    ///
    /// Returns true if this tick finished the run. Reaching zero moves the
    /// phase to `Finished` immediately, so no further decrement happens.
    pub fn tick(&mut self) -> bool {
        if self.phase != TimerPhase::Running {
            return false;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.phase = TimerPhase::Finished;
            return true;
        }
        false
    }

    /// Fraction of the run already elapsed, in `[0.0, 1.0]`.
    pub fn elapsed_fraction(&self) -> f64 {
        if self.total_seconds == 0 {
            return 0.0;
        }
        let elapsed = self.total_seconds.saturating_sub(self.remaining_seconds);
        f64::from(elapsed) / f64::from(self.total_seconds)
    }

    /// Returns true if the countdown is active.
    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    /// Returns true if the countdown is paused.
    pub fn is_paused(&self) -> bool {
        self.phase == TimerPhase::Paused
    }

    /// Returns true if the countdown has reached zero.
    pub fn is_finished(&self) -> bool {
        self.phase == TimerPhase::Finished
    }
}

// ============================================================================
// Tests
// ============================================================================
