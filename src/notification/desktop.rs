//! Desktop notifications through `notify-rust`.

use notify_rust::{Notification, Timeout};
use tokio::runtime::Handle;
use tracing::{debug, warn};

use super::content::NotificationContent;
use super::error::NotificationError;
use super::NotificationSender;

/// Application name reported to the notification service.
const APP_NAME: &str = "tomato-clock";

/// How long the notification stays on screen, in milliseconds.
const DISPLAY_TIMEOUT_MS: u32 = 10_000;

/// Sends notifications to the desktop notification service.
///
/// Delivery runs on the tokio blocking pool, so `send` never blocks the
/// caller on the platform service. Sending requires a running runtime.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    enabled: bool,
}

impl DesktopNotifier {
    /// Creates a notifier. A disabled notifier rejects every send.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Returns true if the platform looks able to show notifications.
    #[must_use]
    pub fn platform_supported() -> bool {
        #[cfg(all(unix, not(target_os = "macos")))]
        {
            std::env::var_os("DBUS_SESSION_BUS_ADDRESS").is_some()
        }
        #[cfg(not(all(unix, not(target_os = "macos"))))]
        {
            true
        }
    }
}

impl NotificationSender for DesktopNotifier {
    fn send(&self, content: &NotificationContent) -> Result<(), NotificationError> {
        if !self.enabled {
            return Err(NotificationError::Disabled);
        }
        if !Self::platform_supported() {
            return Err(NotificationError::NotAvailable);
        }

        let runtime = Handle::try_current()
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

        let title = content.title.clone();
        let body = content.body.clone();

        runtime.spawn_blocking(move || {
            let result = Notification::new()
                .appname(APP_NAME)
                .summary(&title)
                .body(&body)
                .timeout(Timeout::Milliseconds(DISPLAY_TIMEOUT_MS))
                .show();
            match result {
                Ok(_) => debug!("Notification shown: {}", title),
                Err(e) => warn!("Notification failed: {}", e),
            }
        });

        Ok(())
    }

    fn is_available(&self) -> bool {
        self.enabled && Self::platform_supported()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_notifier_rejects() {
        let notifier = DesktopNotifier::new(false);
        assert!(!notifier.is_available());

        let result = notifier.send(&NotificationContent::completion());
        assert!(matches!(result, Err(NotificationError::Disabled)));
    }

    #[test]
    fn test_enabled_notifier_follows_platform() {
        let notifier = DesktopNotifier::new(true);
        assert_eq!(notifier.is_available(), DesktopNotifier::platform_supported());
    }

    #[test]
    fn test_send_outside_runtime_fails() {
        if !DesktopNotifier::platform_supported() {
            return;
        }
        let notifier = DesktopNotifier::new(true);

        let result = notifier.send(&NotificationContent::completion());

        assert!(matches!(result, Err(NotificationError::SendFailed(_))));
    }
}
