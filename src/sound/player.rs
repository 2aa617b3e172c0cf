//! Sound player implementation using rodio.
//!
//! The player keeps a single output sink, so consecutive `play` calls queue
//! one after another instead of overlapping. That is what turns repeated
//! alert calls into an audible repeated pattern.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rodio::source::{SineWave, Source};
use rodio::{Decoder, OutputStream, Sink};
use tracing::{debug, warn};

use super::error::SoundError;
use super::source::{SoundSource, ALARM_GAIN, ALARM_PATTERN};

/// A sound player that uses rodio for audio playback.
///
/// Playback is non-blocking; queued sounds keep playing in the background
/// for as long as the player is alive.
pub struct RodioSoundPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Queue of sounds waiting to be played.
    sink: Sink,
    /// Whether sound playback is disabled.
    disabled: AtomicBool,
}

impl RodioSoundPlayer {
    /// Creates a new sound player on the default output device.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available, or `SoundError::StreamError` if the sink cannot be
    /// created.
    pub fn new(disabled: bool) -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;
        let sink =
            Sink::try_new(&stream_handle).map_err(|e| SoundError::StreamError(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            sink,
            disabled: AtomicBool::new(disabled),
        })
    }

    /// Queues a sound from the given source.
    ///
    /// If a file source cannot be opened or decoded, the synthesized chime
    /// is queued instead.
    pub fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.disabled.load(Ordering::Relaxed) {
            debug!("Sound playback disabled, skipping");
            return Ok(());
        }

        match source {
            SoundSource::File { path } => match self.play_file(path) {
                Ok(()) => Ok(()),
                Err(e) if e.should_fallback_to_tone() => {
                    warn!(
                        "Failed to play '{}': {}, falling back to tone",
                        path.display(),
                        e
                    );
                    self.play_tone();
                    Ok(())
                }
                Err(e) => Err(e),
            },
            SoundSource::Tone => {
                self.play_tone();
                Ok(())
            }
        }
    }

    /// Queues an audio file from the filesystem.
    fn play_file(&self, path: &Path) -> Result<(), SoundError> {
        let file = File::open(path)
            .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;

        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| SoundError::DecodeError(e.to_string()))?;

        self.sink.append(decoder);
        debug!("Queued sound file: {}", path.display());
        Ok(())
    }

    /// Queues one synthesized chime.
    fn play_tone(&self) {
        for step in ALARM_PATTERN {
            let gain = if step.is_silence() { 0.0 } else { ALARM_GAIN };
            let frequency = if step.is_silence() { 440.0 } else { step.frequency_hz };
            self.sink.append(
                SineWave::new(frequency)
                    .take_duration(step.duration)
                    .amplify(gain),
            );
        }
        debug!("Queued alarm chime");
    }

    /// Returns true if sound playback is currently disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Relaxed)
    }

    /// Enables sound playback.
    pub fn enable(&self) {
        self.disabled.store(false, Ordering::Relaxed);
        debug!("Sound playback enabled");
    }

    /// Disables sound playback.
    pub fn disable(&self) {
        self.disabled.store(true, Ordering::Relaxed);
        debug!("Sound playback disabled");
    }

    /// Returns true if the audio system is available.
    ///
    /// Always true once the player exists, since the output stream is
    /// opened during construction.
    #[must_use]
    pub fn is_available(&self) -> bool {
        true
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer")
            .field("disabled", &self.disabled.load(Ordering::Relaxed))
            .field("queued", &self.sink.len())
            .finish_non_exhaustive()
    }
}

/// Creates a sound player, returning None if audio is unavailable.
///
/// If audio initialization fails, a warning is logged and None is returned.
#[must_use]
pub fn try_create_player(disabled: bool) -> Option<Arc<RodioSoundPlayer>> {
    match RodioSoundPlayer::new(disabled) {
        Ok(player) => Some(Arc::new(player)),
        Err(e) => {
            warn!("Audio not available, sound disabled: {}", e);
            None
        }
    }
}
