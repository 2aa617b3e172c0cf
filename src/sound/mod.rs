//! Sound playback for the completion alarm.
//!
//! This module provides audio alert capabilities, including:
//!
//! - A synthesized alarm chime that needs no sound files
//! - Optional playback of a user-supplied audio file
//! - Queued, non-blocking playback so repeated alerts form a pattern
//! - Graceful degradation when audio is unavailable
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   SoundPlayer    │ ← Main interface
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │   SoundSource    │────▶│  Audio file      │
//! │                  │     │  (--sound-file)  │
//! │                  │     ├──────────────────┤
//! │                  │────▶│  Chime (sine     │
//! └──────────────────┘     │  wave, fallback) │
//!                          └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use tomato_clock::sound::{RodioSoundPlayer, SoundSource};
//!
//! // Create a player (may fail if no audio device)
//! let player = RodioSoundPlayer::new(false).expect("audio init");
//!
//! // Queue the alarm chime twice
//! player.play(&SoundSource::Tone).expect("playback failed");
//! player.play(&SoundSource::Tone).expect("playback failed");
//! ```

mod error;
mod player;
mod source;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub use error::SoundError;
pub use player::{try_create_player, RodioSoundPlayer};
pub use source::{SoundSource, ToneStep, ALARM_GAIN, ALARM_PATTERN};

/// Trait for sound playback implementations.
///
/// This trait abstracts the sound playback functionality, allowing for
/// different implementations (e.g., rodio-based, mock for testing).
pub trait SoundPlayer {
    /// Plays a sound from the given source.
    ///
    /// This method should be non-blocking; the sound plays in the background.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self, source: &SoundSource) -> Result<(), SoundError>;

    /// Returns true if the audio system is available.
    fn is_available(&self) -> bool;

    /// Returns true if sound playback is disabled.
    fn is_disabled(&self) -> bool;

    /// Enables sound playback.
    fn enable(&self);

    /// Disables sound playback.
    fn disable(&self);
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, source)
    }

    fn is_available(&self) -> bool {
        RodioSoundPlayer::is_available(self)
    }

    fn is_disabled(&self) -> bool {
        RodioSoundPlayer::is_disabled(self)
    }

    fn enable(&self) {
        RodioSoundPlayer::enable(self)
    }

    fn disable(&self) {
        RodioSoundPlayer::disable(self)
    }
}

/// Mock sound player for testing.
#[derive(Debug)]
pub struct MockSoundPlayer {
    play_calls: Mutex<Vec<SoundSource>>,
    available: AtomicBool,
    disabled: AtomicBool,
    should_fail: AtomicBool,
}

impl Default for MockSoundPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            play_calls: Mutex::new(Vec::new()),
            available: AtomicBool::new(true),
            disabled: AtomicBool::new(false),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().unwrap().len()
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<SoundSource> {
        self.play_calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.play_calls.lock().unwrap().clear();
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        if self.disabled.load(Ordering::SeqCst) {
            return Ok(());
        }
        self.play_calls.lock().unwrap().push(source.clone());
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }

    fn enable(&self) {
        self.disabled.store(false, Ordering::SeqCst);
    }

    fn disable(&self) {
        self.disabled.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_plays() {
        let player = MockSoundPlayer::new();
        player.play(&SoundSource::Tone).unwrap();
        player.play(&SoundSource::file("/x/bell.wav")).unwrap();

        assert_eq!(player.play_count(), 2);
        assert_eq!(player.get_play_calls()[0], SoundSource::Tone);

        player.clear_calls();
        assert_eq!(player.play_count(), 0);
    }

    #[test]
    fn test_mock_disabled_is_silent() {
        let player = MockSoundPlayer::new();
        player.disable();
        assert!(player.is_disabled());

        player.play(&SoundSource::Tone).unwrap();
        assert_eq!(player.play_count(), 0);

        player.enable();
        player.play(&SoundSource::Tone).unwrap();
        assert_eq!(player.play_count(), 1);
    }

    #[test]
    fn test_mock_failure() {
        let player = MockSoundPlayer::new();
        player.set_should_fail(true);
        assert!(player.play(&SoundSource::Tone).is_err());
    }
}
