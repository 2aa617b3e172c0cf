//! Sound source selection.
//!
//! The alarm is either the built-in chime, synthesized from a short table of
//! tone steps, or a user-supplied audio file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::error::SoundError;

/// One step of the synthesized alarm chime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneStep {
    /// Frequency in Hz; `0.0` is silence
    pub frequency_hz: f32,
    /// How long the step lasts
    pub duration: Duration,
}

impl ToneStep {
    const fn tone(frequency_hz: f32, millis: u64) -> Self {
        Self {
            frequency_hz,
            duration: Duration::from_millis(millis),
        }
    }

    /// Returns true if this step produces no sound.
    pub fn is_silence(&self) -> bool {
        self.frequency_hz <= 0.0
    }
}

/// Gain applied to the synthesized chime.
pub const ALARM_GAIN: f32 = 0.3;

/// The built-in chime: high, low, high, then a short gap so repeated plays
/// stay distinguishable.
pub const ALARM_PATTERN: &[ToneStep] = &[
    ToneStep::tone(800.0, 100),
    ToneStep::tone(600.0, 100),
    ToneStep::tone(800.0, 300),
    ToneStep::tone(0.0, 200),
];

/// Represents the source of the alarm sound.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SoundSource {
    /// The synthesized chime in [`ALARM_PATTERN`].
    #[default]
    Tone,
    /// An audio file on disk.
    File {
        /// Path to the audio file
        path: PathBuf,
    },
}

impl SoundSource {
    /// Creates a file sound source without touching the filesystem.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into() }
    }

    /// Creates a file sound source, checking the file exists and has a
    /// supported extension.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::FileNotFound` for a missing file and
    /// `SoundError::DecodeError` for an unsupported extension.
    pub fn file_validated(path: impl Into<PathBuf>) -> Result<Self, SoundError> {
        let path = path.into();
        if !path.is_file() {
            return Err(SoundError::FileNotFound(path.display().to_string()));
        }
        if !has_supported_extension(&path) {
            return Err(SoundError::DecodeError(format!(
                "unsupported file type: {}",
                path.display()
            )));
        }
        Ok(Self::File { path })
    }

    /// Returns a short name for logging.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Tone => "tone".to_string(),
            Self::File { path } => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        }
    }

    /// Returns true if this is the synthesized chime.
    #[must_use]
    pub fn is_tone(&self) -> bool {
        matches!(self, Self::Tone)
    }

    /// Returns the file path if this is a file source.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File { path } => Some(path),
            Self::Tone => None,
        }
    }
}

/// Supported audio file extensions.
const SUPPORTED_EXTENSIONS: &[&str] = &["wav", "mp3", "flac", "ogg"];

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}
