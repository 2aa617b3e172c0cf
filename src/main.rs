//! tomato-clock - a Pomodoro countdown timer for the terminal
//!
//! Set a duration, start the countdown, and get an alarm and a desktop
//! notification when time is up. The last used duration is remembered.

use std::io::IsTerminal;
use std::path::Path;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing::warn;

use tomato_clock::cli::{Cli, Commands, Display, PrefsAction, PrefsArgs, RunArgs, Session};
use tomato_clock::completion::DesktopCompletionSink;
use tomato_clock::notification::DesktopNotifier;
use tomato_clock::preferences::{
    JsonFilePreferenceStore, NullPreferenceStore, PreferenceError, PreferenceStore,
};
use tomato_clock::sound::{try_create_player, SoundSource};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so they never interleave with the clock on stdout.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => run_session(args).await?,
        Some(Commands::Prefs { action }) => manage_preferences(action)?,
        Some(Commands::Completions { shell }) => generate_completions(shell),
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Runs an interactive session on stdin/stdout.
async fn run_session(args: RunArgs) -> Result<()> {
    let settings = args.settings()?;
    let preferences = build_preferences(args.prefs_file.as_deref());
    let completion = build_completion(&args);
    let options = args.session_options(std::io::stdout().is_terminal());

    let mut session = Session::new(
        settings,
        preferences,
        Box::new(completion),
        args.tick_period(),
        options,
    )
    .with_initial_input(args.duration, args.unit);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    session.run(stdin).await?;
    Ok(())
}

/// Opens the preference store, falling back to one that stores nothing.
fn build_preferences(path: Option<&Path>) -> Box<dyn PreferenceStore> {
    match path {
        Some(path) => Box::new(JsonFilePreferenceStore::new(path)),
        None => match JsonFilePreferenceStore::at_default_location() {
            Ok(store) => Box::new(store),
            Err(e) => {
                warn!("Preferences will not be saved: {}", e);
                Box::new(NullPreferenceStore)
            }
        },
    }
}

/// Builds the completion sink from the sound and notification options.
fn build_completion(args: &RunArgs) -> DesktopCompletionSink {
    let mut sink = DesktopCompletionSink::silent();

    if !args.no_sound {
        let source = match &args.sound_file {
            Some(path) => SoundSource::file_validated(path).unwrap_or_else(|e| {
                warn!("{} ({}), using the built-in chime", e, e.suggestion());
                SoundSource::Tone
            }),
            None => SoundSource::Tone,
        };
        if let Some(player) = try_create_player(false) {
            sink = sink.with_player(player, source);
        }
    }

    if !args.no_notify {
        if DesktopNotifier::platform_supported() {
            sink = sink.with_notifier(Box::new(DesktopNotifier::new(true)));
        } else {
            warn!("Desktop notifications are not available on this system");
        }
    }

    sink
}

/// Shows or clears the saved preference.
fn manage_preferences(action: PrefsAction) -> Result<()> {
    match action {
        PrefsAction::Show(args) => {
            let store = open_preference_file(&args)?;
            let record = store.read()?;
            Display::show_preference(record.as_ref(), store.path())?;
        }
        PrefsAction::Clear(args) => {
            let store = open_preference_file(&args)?;
            if store.clear()? {
                Display::show_message("Saved preference cleared");
            } else {
                Display::show_message("No saved preference");
            }
        }
    }
    Ok(())
}

fn open_preference_file(args: &PrefsArgs) -> Result<JsonFilePreferenceStore, PreferenceError> {
    match &args.prefs_file {
        Some(path) => Ok(JsonFilePreferenceStore::new(path)),
        None => JsonFilePreferenceStore::at_default_location(),
    }
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
