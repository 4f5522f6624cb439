//! Passive desktop notifications.

use notify_rust::Notification;
use tracing::{debug, warn};

const SUMMARY: &str = "Tray Recorder";

/// Shows desktop notifications when enabled in the configuration.
#[derive(Debug, Clone, Copy)]
pub struct Notifier {
    enabled: bool,
}

impl Notifier {
    /// Create a notifier; a disabled one only logs.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Report a failure to the user.
    pub fn failure(&self, body: impl Into<String>) {
        self.show(body.into());
    }

    fn show(&self, body: String) {
        if !self.enabled {
            debug!(body = %body, "Notifications disabled");
            return;
        }

        // Some platform backends block until the server replies.
        tokio::task::spawn_blocking(move || {
            if let Err(e) = Notification::new().summary(SUMMARY).body(&body).show() {
                warn!(error = ?e, "Failed to show notification");
            }
        });
    }
}
