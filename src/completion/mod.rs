//! Completion side effects.
//!
//! When a countdown reaches zero the controller plays an audible alert and
//! asks for a desktop notification. Both are fire-and-forget: a
//! [`CompletionSink`] never reports failure back to the controller.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::notification::{NotificationContent, NotificationSender};
use crate::sound::{SoundPlayer, SoundSource};

/// Receiver of the completion side effects.
pub trait CompletionSink {
    /// Plays the alert once. May be called several times in a row to form a
    /// repeated pattern.
    fn play_alert(&self);

    /// Requests a desktop notification.
    fn notify(&self, title: &str, body: &str);
}

impl<T: CompletionSink + ?Sized> CompletionSink for Arc<T> {
    fn play_alert(&self) {
        (**self).play_alert()
    }

    fn notify(&self, title: &str, body: &str) {
        (**self).notify(title, body)
    }
}

/// Completion sink backed by the sound player and the notifier.
///
/// Either collaborator may be absent, in which case its side effect is a
/// no-op.
pub struct DesktopCompletionSink {
    player: Option<Arc<dyn SoundPlayer>>,
    source: SoundSource,
    notifier: Option<Box<dyn NotificationSender>>,
}

impl DesktopCompletionSink {
    /// Creates a sink with no sound and no notifications.
    #[must_use]
    pub fn silent() -> Self {
        Self {
            player: None,
            source: SoundSource::default(),
            notifier: None,
        }
    }

    /// Attaches a sound player and the source it plays.
    #[must_use]
    pub fn with_player(mut self, player: Arc<dyn SoundPlayer>, source: SoundSource) -> Self {
        self.player = Some(player);
        self.source = source;
        self
    }

    /// Attaches a notification sender.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Box<dyn NotificationSender>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Returns true if a sound player is attached.
    #[must_use]
    pub fn has_sound(&self) -> bool {
        self.player.is_some()
    }

    /// Returns true if a notifier is attached.
    #[must_use]
    pub fn has_notifier(&self) -> bool {
        self.notifier.is_some()
    }
}

impl std::fmt::Debug for DesktopCompletionSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesktopCompletionSink")
            .field("sound", &self.player.is_some())
            .field("source", &self.source)
            .field("notifier", &self.notifier.is_some())
            .finish()
    }
}

impl CompletionSink for DesktopCompletionSink {
    fn play_alert(&self) {
        let Some(player) = &self.player else {
            debug!("No sound player, alert skipped");
            return;
        };
        if !player.is_available() {
            debug!("Audio unavailable, alert skipped");
            return;
        }
        if let Err(e) = player.play(&self.source) {
            warn!("Alert playback failed: {} ({})", e, e.suggestion());
        }
    }

    fn notify(&self, title: &str, body: &str) {
        let Some(notifier) = &self.notifier else {
            debug!("No notifier, notification skipped");
            return;
        };
        if !notifier.is_available() {
            debug!("Notifications unavailable, skipped");
            return;
        }

        let content = match NotificationContent::builder().title(title).body(body).build() {
            Ok(content) => content,
            Err(e) => {
                warn!("Notification skipped: {}", e);
                return;
            }
        };
        if let Err(e) = notifier.send(&content) {
            warn!("Notification failed: {} ({})", e, e.suggestion());
        }
    }
}

/// Mock completion sink for testing.
#[derive(Debug, Default)]
pub struct MockCompletionSink {
    alerts: AtomicUsize,
    notifications: Mutex<Vec<(String, String)>>,
}

impl MockCompletionSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn alert_count(&self) -> usize {
        self.alerts.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn notification_count(&self) -> usize {
        self.notifications.lock().unwrap().len()
    }

    #[must_use]
    pub fn get_notifications(&self) -> Vec<(String, String)> {
        self.notifications.lock().unwrap().clone()
    }
}

impl CompletionSink for MockCompletionSink {
    fn play_alert(&self) {
        self.alerts.fetch_add(1, Ordering::SeqCst);
    }

    fn notify(&self, title: &str, body: &str) {
        self.notifications
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::{MockNotificationSender, COMPLETION_BODY, COMPLETION_TITLE};
    use crate::sound::MockSoundPlayer;

    fn desktop_sink() -> (
        DesktopCompletionSink,
        Arc<MockSoundPlayer>,
        Arc<MockNotificationSender>,
    ) {
        let player = Arc::new(MockSoundPlayer::new());
        let notifier = Arc::new(MockNotificationSender::new());
        let sink = DesktopCompletionSink::silent()
            .with_player(player.clone(), SoundSource::Tone)
            .with_notifier(Box::new(notifier.clone()));
        (sink, player, notifier)
    }

    #[test]
    fn test_silent_sink_is_noop() {
        let sink = DesktopCompletionSink::silent();
        assert!(!sink.has_sound());
        assert!(!sink.has_notifier());
        sink.play_alert();
        sink.notify(COMPLETION_TITLE, COMPLETION_BODY);
    }

    #[test]
    fn test_play_alert_uses_player() {
        let (sink, player, _notifier) = desktop_sink();

        sink.play_alert();
        sink.play_alert();

        assert_eq!(player.play_count(), 2);
        assert_eq!(player.get_play_calls()[0], SoundSource::Tone);
    }

    #[test]
    fn test_play_alert_skipped_when_audio_unavailable() {
        let (sink, player, _notifier) = desktop_sink();
        player.set_available(false);

        sink.play_alert();

        assert_eq!(player.play_count(), 0);
    }

    #[test]
    fn test_play_alert_swallows_failure() {
        let (sink, player, _notifier) = desktop_sink();
        player.set_should_fail(true);

        sink.play_alert();
    }

    #[test]
    fn test_notify_sends_content() {
        let (sink, _player, notifier) = desktop_sink();

        sink.notify(COMPLETION_TITLE, COMPLETION_BODY);

        let sent = notifier.get_notifications();
        assert_eq!(sent, vec![NotificationContent::completion()]);
    }

    #[test]
    fn test_notify_skipped_without_permission() {
        let (sink, _player, notifier) = desktop_sink();
        notifier.set_available(false);

        sink.notify(COMPLETION_TITLE, COMPLETION_BODY);

        assert_eq!(notifier.notification_count(), 0);
    }

    #[test]
    fn test_notify_swallows_failure() {
        let (sink, _player, notifier) = desktop_sink();
        notifier.set_should_fail(true);

        sink.notify(COMPLETION_TITLE, COMPLETION_BODY);

        assert_eq!(notifier.notification_count(), 0);
    }

    #[test]
    fn test_mock_sink_records() {
        let sink = MockCompletionSink::new();
        sink.play_alert();
        sink.notify("a", "b");

        assert_eq!(sink.alert_count(), 1);
        assert_eq!(sink.get_notifications(), vec![("a".to_string(), "b".to_string())]);
    }
}
