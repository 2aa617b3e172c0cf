//! Command definitions for the tomato-clock CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::timer::TimerError;
use crate::types::{DurationUnit, TimerConfig, TimerSettings};

use super::session::SessionOptions;

// ============================================================================
// CLI Structure
// ============================================================================

/// tomato-clock - a terminal Pomodoro countdown timer
#[derive(Parser, Debug)]
#[command(
    name = "tomato-clock",
    version,
    about = "A terminal Pomodoro countdown timer",
    long_about = "A Pomodoro countdown timer for the terminal.\n\
                  Type commands (start, pause, reset, set 25 ...) while it runs; \
                  it plays an alarm and sends a desktop notification when time is up.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run an interactive timer session
    Run(RunArgs),

    /// Inspect or clear the saved duration preference
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Actions of the `prefs` subcommand
#[derive(Subcommand, Debug, Clone)]
pub enum PrefsAction {
    /// Print the saved preference as JSON
    Show(PrefsArgs),

    /// Delete the saved preference
    Clear(PrefsArgs),
}

/// Arguments shared by the `prefs` actions
#[derive(Args, Debug, Clone, Default)]
pub struct PrefsArgs {
    /// Preference file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub prefs_file: Option<PathBuf>,
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Initial duration, overriding the saved preference for this session
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub duration: Option<u32>,

    /// Unit of the initial duration
    #[arg(short, long, value_enum)]
    pub unit: Option<DurationUnit>,

    /// Duration used when no preference is saved
    #[arg(
        long,
        value_name = "N",
        default_value = "25",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub default_duration: u32,

    /// Unit of the default duration
    #[arg(long, value_enum, default_value_t = DurationUnit::Minutes)]
    pub default_unit: DurationUnit,

    /// How many times the alarm plays when time is up (1-10)
    #[arg(
        long,
        value_name = "N",
        default_value = "3",
        value_parser = clap::value_parser!(u32).range(1..=10)
    )]
    pub alert_repeats: u32,

    /// Audio file to play instead of the built-in chime
    #[arg(long, value_name = "PATH", conflicts_with = "no_sound")]
    pub sound_file: Option<PathBuf>,

    /// Disable the alarm sound
    #[arg(long)]
    pub no_sound: bool,

    /// Disable desktop notifications
    #[arg(long)]
    pub no_notify: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Start the countdown immediately
    #[arg(short, long)]
    pub start: bool,

    /// Exit once the countdown finishes
    #[arg(long)]
    pub exit_on_finish: bool,

    /// Preference file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub prefs_file: Option<PathBuf>,

    /// Tick period in milliseconds
    #[arg(
        long,
        hide = true,
        default_value = "1000",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub tick_ms: u64,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            duration: None,
            unit: None,
            default_duration: 25,
            default_unit: DurationUnit::Minutes,
            alert_repeats: 3,
            sound_file: None,
            no_sound: false,
            no_notify: false,
            no_progress: false,
            start: false,
            exit_on_finish: false,
            prefs_file: None,
            tick_ms: 1000,
        }
    }
}

impl RunArgs {
    /// Builds the controller settings.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::InvalidDuration`] if the default duration does
    /// not fit in seconds.
    pub fn settings(&self) -> Result<TimerSettings, TimerError> {
        let default_config = TimerConfig::new(self.default_duration, self.default_unit)?;
        Ok(TimerSettings::default()
            .with_default_config(default_config)
            .with_alert_repeats(self.alert_repeats))
    }

    /// Builds the session options. `color` is decided by the caller.
    pub fn session_options(&self, color: bool) -> SessionOptions {
        SessionOptions {
            show_progress: !self.no_progress,
            start_immediately: self.start,
            exit_on_finish: self.exit_on_finish,
            color,
        }
    }

    /// Returns the tick period.
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Cli Tests
    // ------------------------------------------------------------------------

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_no_args() {
            let cli = Cli::parse_from(["tomato-clock"]);
            assert!(cli.command.is_none());
            assert!(!cli.verbose);
        }

        #[test]
        fn test_parse_verbose_flag() {
            let cli = Cli::parse_from(["tomato-clock", "--verbose"]);
            assert!(cli.verbose);
        }

        #[test]
        fn test_parse_short_verbose_after_subcommand() {
            let cli = Cli::parse_from(["tomato-clock", "run", "-v"]);
            assert!(cli.verbose);
        }

        #[test]
        fn test_parse_run_command() {
            let cli = Cli::parse_from(["tomato-clock", "run"]);
            assert!(matches!(cli.command, Some(Commands::Run(_))));
        }

        #[test]
        fn test_parse_prefs_show() {
            let cli = Cli::parse_from(["tomato-clock", "prefs", "show"]);
            match cli.command {
                Some(Commands::Prefs {
                    action: PrefsAction::Show(args),
                }) => assert!(args.prefs_file.is_none()),
                _ => panic!("Expected prefs show"),
            }
        }

        #[test]
        fn test_parse_prefs_clear_with_file() {
            let cli = Cli::parse_from([
                "tomato-clock",
                "prefs",
                "clear",
                "--prefs-file",
                "/tmp/p.json",
            ]);
            match cli.command {
                Some(Commands::Prefs {
                    action: PrefsAction::Clear(args),
                }) => assert_eq!(args.prefs_file, Some(PathBuf::from("/tmp/p.json"))),
                _ => panic!("Expected prefs clear"),
            }
        }

        #[test]
        fn test_parse_completions_bash() {
            let cli = Cli::parse_from(["tomato-clock", "completions", "bash"]);
            match cli.command {
                Some(Commands::Completions { shell }) => {
                    assert_eq!(shell, clap_complete::Shell::Bash);
                }
                _ => panic!("Expected Completions command"),
            }
        }

        #[test]
        fn test_parse_completions_zsh() {
            let cli = Cli::parse_from(["tomato-clock", "completions", "zsh"]);
            assert!(matches!(
                cli.command,
                Some(Commands::Completions {
                    shell: clap_complete::Shell::Zsh
                })
            ));
        }
    }

    // ------------------------------------------------------------------------
    // Run Command Tests
    // ------------------------------------------------------------------------

    mod run_args_tests {
        use super::*;
        use crate::timer::DEFAULT_TICK_PERIOD;

        fn parse_run(args: &[&str]) -> RunArgs {
            let mut argv = vec!["tomato-clock", "run"];
            argv.extend_from_slice(args);
            match Cli::parse_from(argv).command {
                Some(Commands::Run(args)) => args,
                _ => panic!("Expected Run command"),
            }
        }

        #[test]
        fn test_parse_run_defaults() {
            let args = parse_run(&[]);
            assert!(args.duration.is_none());
            assert!(args.unit.is_none());
            assert_eq!(args.default_duration, 25);
            assert_eq!(args.default_unit, DurationUnit::Minutes);
            assert_eq!(args.alert_repeats, 3);
            assert!(args.sound_file.is_none());
            assert!(!args.no_sound);
            assert!(!args.no_notify);
            assert!(!args.no_progress);
            assert!(!args.start);
            assert!(!args.exit_on_finish);
            assert!(args.prefs_file.is_none());
            assert_eq!(args.tick_ms, 1000);
        }

        #[test]
        fn test_parse_run_duration_and_unit() {
            let args = parse_run(&["--duration", "90", "--unit", "seconds"]);
            assert_eq!(args.duration, Some(90));
            assert_eq!(args.unit, Some(DurationUnit::Seconds));
        }

        #[test]
        fn test_parse_run_short_flags() {
            let args = parse_run(&["-d", "40", "-u", "minutes", "-s"]);
            assert_eq!(args.duration, Some(40));
            assert_eq!(args.unit, Some(DurationUnit::Minutes));
            assert!(args.start);
        }

        #[test]
        fn test_parse_run_all_options() {
            let args = parse_run(&[
                "--default-duration",
                "50",
                "--default-unit",
                "seconds",
                "--alert-repeats",
                "5",
                "--sound-file",
                "/sounds/bell.wav",
                "--no-notify",
                "--no-progress",
                "--exit-on-finish",
                "--prefs-file",
                "/tmp/prefs.json",
                "--tick-ms",
                "50",
            ]);
            assert_eq!(args.default_duration, 50);
            assert_eq!(args.default_unit, DurationUnit::Seconds);
            assert_eq!(args.alert_repeats, 5);
            assert_eq!(args.sound_file, Some(PathBuf::from("/sounds/bell.wav")));
            assert!(args.no_notify);
            assert!(args.no_progress);
            assert!(args.exit_on_finish);
            assert_eq!(args.prefs_file, Some(PathBuf::from("/tmp/prefs.json")));
            assert_eq!(args.tick_ms, 50);
        }

        #[test]
        fn test_run_args_default_matches_parse() {
            let parsed = parse_run(&[]);
            let default = RunArgs::default();
            assert_eq!(parsed.default_duration, default.default_duration);
            assert_eq!(parsed.alert_repeats, default.alert_repeats);
            assert_eq!(parsed.tick_ms, default.tick_ms);
        }

        #[test]
        fn test_settings_conversion() {
            let args = parse_run(&["--default-duration", "90", "--default-unit", "seconds"]);
            let settings = args.settings().unwrap();
            assert_eq!(settings.default_config.total_seconds(), 90);
            assert_eq!(settings.alert_repeats, 3);
        }

        #[test]
        fn test_settings_rejects_overflowing_default() {
            let args = RunArgs {
                default_duration: u32::MAX,
                ..RunArgs::default()
            };
            assert!(args.settings().is_err());
        }

        #[test]
        fn test_session_options_conversion() {
            let args = parse_run(&["--no-progress", "--start", "--exit-on-finish"]);
            let options = args.session_options(true);
            assert!(!options.show_progress);
            assert!(options.start_immediately);
            assert!(options.exit_on_finish);
            assert!(options.color);
        }

        #[test]
        fn test_tick_period() {
            assert_eq!(RunArgs::default().tick_period(), DEFAULT_TICK_PERIOD);
            let args = parse_run(&["--tick-ms", "50"]);
            assert_eq!(args.tick_period(), Duration::from_millis(50));
        }
    }

    // ------------------------------------------------------------------------
    // Error Case Tests (using try_parse)
    // ------------------------------------------------------------------------

    mod error_tests {
        use super::*;

        #[test]
        fn test_parse_run_duration_zero() {
            let result = Cli::try_parse_from(["tomato-clock", "run", "--duration", "0"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_run_duration_negative() {
            let result = Cli::try_parse_from(["tomato-clock", "run", "--duration", "-5"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_run_duration_not_number() {
            let result = Cli::try_parse_from(["tomato-clock", "run", "--duration", "abc"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_run_invalid_unit() {
            let result = Cli::try_parse_from(["tomato-clock", "run", "--unit", "hours"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_run_alert_repeats_out_of_range() {
            assert!(Cli::try_parse_from(["tomato-clock", "run", "--alert-repeats", "0"]).is_err());
            assert!(Cli::try_parse_from(["tomato-clock", "run", "--alert-repeats", "11"]).is_err());
        }

        #[test]
        fn test_parse_run_sound_file_conflicts_with_no_sound() {
            let result = Cli::try_parse_from([
                "tomato-clock",
                "run",
                "--no-sound",
                "--sound-file",
                "bell.wav",
            ]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_unknown_command() {
            let result = Cli::try_parse_from(["tomato-clock", "unknown"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_prefs_without_action() {
            let result = Cli::try_parse_from(["tomato-clock", "prefs"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_completions_invalid_shell() {
            let result = Cli::try_parse_from(["tomato-clock", "completions", "invalid"]);
            assert!(result.is_err());
        }
    }
}
