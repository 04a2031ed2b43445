//! # Notifications
//!
//! Every mutation attempt surfaces a transient, non-blocking message to the user. The slice
//! only produces [`Notification`]s; how they are shown is up to the [`Notifier`] the host
//! injects.

use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{info, warn};

/// Default on-screen duration of a notification.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
    pub duration: Duration,
}

impl Notification {
    pub fn success(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
            duration,
        }
    }

    pub fn error(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
            duration,
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Fans notifications out to any number of subscribers (toast renderers, tests).
///
/// Sending with no subscriber is not an error; the message is simply dropped.
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    sender: broadcast::Sender<Notification>,
}

impl BroadcastNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl Notifier for BroadcastNotifier {
    fn notify(&self, notification: Notification) {
        let _ = self.sender.send(notification);
    }
}

/// Writes notifications to the log. Used by the command-line host.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            Level::Success => info!(message = %notification.message, "Notification"),
            Level::Error => warn!(message = %notification.message, "Notification"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn broadcast_reaches_every_subscriber() {
        let notifier = BroadcastNotifier::new(8);
        let mut first = notifier.subscribe();
        let mut second = notifier.subscribe();

        notifier.notify(Notification::success("ok", DEFAULT_DURATION));

        assert_eq!(first.recv().await.unwrap().message, "ok");
        assert_eq!(second.recv().await.unwrap().level, Level::Success);
    }

    #[test]
    fn broadcast_without_subscribers_is_silent() {
        let notifier = BroadcastNotifier::new(1);
        notifier.notify(Notification::error("lost", DEFAULT_DURATION));
    }
}
