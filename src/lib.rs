//! tomato-clock library
//!
//! This library provides the core functionality for the tomato-clock CLI.
//! It includes:
//! - The countdown controller, its tick loop and display projection
//! - Persisted duration preference
//! - Completion side effects: alarm sound and desktop notification
//! - CLI command parsing, display utilities and the interactive session

pub mod cli;
pub mod completion;
pub mod notification;
pub mod preferences;
pub mod sound;
pub mod timer;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    DurationInput, DurationUnit, PreferenceRecord, TimerConfig, TimerPhase, TimerSettings,
    TimerState,
};

pub use timer::{
    StartOutcome, Tick, TickLoop, TickOutcome, TimerController, TimerError, TimerEvent, TimerView,
};

pub use completion::{CompletionSink, DesktopCompletionSink, MockCompletionSink};

pub use preferences::{
    JsonFilePreferenceStore, MemoryPreferenceStore, NullPreferenceStore, PreferenceError,
    PreferenceStore,
};

pub use notification::{
    DesktopNotifier, MockNotificationSender, NotificationContent, NotificationError,
    NotificationSender,
};

pub use sound::{MockSoundPlayer, RodioSoundPlayer, SoundError, SoundPlayer, SoundSource};
