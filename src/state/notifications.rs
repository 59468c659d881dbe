//! Toast notifications

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a success toast stays on screen
pub const SUCCESS_TOAST_DURATION: Duration = Duration::from_secs(2);
/// How long an error toast stays on screen
pub const ERROR_TOAST_DURATION: Duration = Duration::from_secs(4);
/// Maximum number of toasts kept at once; the oldest is dropped first
const MAX_TOASTS: usize = 5;

/// Receiver of user-facing submit feedback
pub trait NotificationSink {
    fn notify_success(&mut self, text: &str);
    fn notify_error(&mut self, text: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub shown_at: Instant,
}

impl Toast {
    fn lifetime(&self) -> Duration {
        match self.kind {
            ToastKind::Success => SUCCESS_TOAST_DURATION,
            ToastKind::Error => ERROR_TOAST_DURATION,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.lifetime()
    }
}

/// Queue of toasts currently visible, oldest first
#[derive(Debug, Default)]
pub struct Notifications {
    toasts: VecDeque<Toast>,
}

impl Notifications {
    fn push(&mut self, kind: ToastKind, message: &str) {
        if self.toasts.len() == MAX_TOASTS {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast {
            kind,
            message: message.to_string(),
            shown_at: Instant::now(),
        });
    }

    /// Drop toasts whose display time has elapsed
    pub fn expire(&mut self, now: Instant) {
        self.toasts.retain(|t| !t.is_expired(now));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl NotificationSink for Notifications {
    fn notify_success(&mut self, text: &str) {
        self.push(ToastKind::Success, text);
    }

    fn notify_error(&mut self, text: &str) {
        self.push(ToastKind::Error, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let notifications = Notifications::default();
        assert!(notifications.is_empty());
    }

    #[test]
    fn test_notify_pushes_in_order() {
        let mut notifications = Notifications::default();
        notifications.notify_error("first");
        notifications.notify_success("second");

        let toasts: Vec<_> = notifications.iter().collect();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].kind, ToastKind::Error);
        assert_eq!(toasts[0].message, "first");
        assert_eq!(toasts[1].kind, ToastKind::Success);
    }

    #[test]
    fn test_oldest_dropped_when_full() {
        let mut notifications = Notifications::default();
        for i in 0..=MAX_TOASTS {
            notifications.notify_success(&format!("toast {i}"));
        }
        assert_eq!(notifications.iter().count(), MAX_TOASTS);
        assert_eq!(notifications.iter().next().unwrap().message, "toast 1");
    }

    #[test]
    fn test_success_expires_before_error() {
        let mut notifications = Notifications::default();
        notifications.notify_success("booked");
        notifications.notify_error("failed");

        let later = Instant::now() + SUCCESS_TOAST_DURATION + Duration::from_millis(10);
        notifications.expire(later);

        let remaining: Vec<_> = notifications.iter().collect();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].kind, ToastKind::Error);

        notifications.expire(Instant::now() + ERROR_TOAST_DURATION + Duration::from_millis(10));
        assert!(notifications.is_empty());
    }

    #[test]
    fn test_fresh_toast_not_expired() {
        let mut notifications = Notifications::default();
        notifications.notify_error("failed");
        notifications.expire(Instant::now());
        assert_eq!(notifications.iter().count(), 1);
    }
}
