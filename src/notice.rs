//! # User Notices
//!
//! One-shot, user-facing messages ("toasts"). Every actor reports the outcome of a
//! user intent here instead of failing the caller: rejected mutations, sign-in
//! failures, sync errors.
//!
//! [`Notifier`] is a cheap clonable handle around a `tokio::sync::broadcast` channel.
//! Views subscribe with [`Notifier::subscribe`]; a notice sent while nobody is
//! listening is dropped.

use tokio::sync::broadcast;
use tracing::{debug, info};

/// Visual weight of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level: NoticeLevel::Info,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level: NoticeLevel::Destructive,
        }
    }
}

#[derive(Clone)]
pub struct Notifier {
    sender: broadcast::Sender<Notice>,
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.sender.subscribe()
    }

    pub fn notify(&self, notice: Notice) {
        info!(title = %notice.title, level = ?notice.level, "Notice");
        if self.sender.send(notice).is_err() {
            debug!("No notice subscribers");
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_notice_reaches_subscriber() {
        let notifier = Notifier::default();
        let mut notices = notifier.subscribe();

        notifier.notify(Notice::info("Added to cart!", "Teriyaki has been added to your cart."));

        let notice = notices.recv().await.unwrap();
        assert_eq!(notice.title, "Added to cart!");
        assert_eq!(notice.level, NoticeLevel::Info);
    }

    #[test]
    fn test_notify_without_subscribers_is_silent() {
        let notifier = Notifier::new(4);
        notifier.notify(Notice::destructive("Login failed", "bad password"));
    }
}
