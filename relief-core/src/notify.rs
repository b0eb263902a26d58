use crate::clock::Clock;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Default,
    Destructive,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Default,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            severity: Severity::Destructive,
            ..Self::new(title, description)
        }
    }
}

/// Surface that shows notifications to the user.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToastId(pub u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub notification: Notification,
    pub shown_at: Duration,
}

#[derive(Debug)]
struct TrayState {
    next_id: u64,
    toasts: VecDeque<Toast>,
}

/// Notifier that keeps a bounded, self-expiring stack of toasts.
///
/// Newest toasts come first. Once `limit` is reached the oldest toast is
/// dropped, and every toast disappears `ttl` after it was shown.
#[derive(Debug)]
pub struct ToastTray<C> {
    clock: C,
    limit: usize,
    ttl: Duration,
    state: Mutex<TrayState>,
}

impl<C: Clock> ToastTray<C> {
    pub fn new(clock: C, limit: usize, ttl: Duration) -> Self {
        Self {
            clock,
            limit,
            ttl,
            state: Mutex::new(TrayState {
                next_id: 1,
                toasts: VecDeque::new(),
            }),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Toasts still on screen, newest first.
    pub fn visible(&self) -> Vec<Toast> {
        let now = self.clock.now();
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let ttl = self.ttl;
        state.toasts.retain(|t| now.saturating_sub(t.shown_at) < ttl);
        state.toasts.iter().cloned().collect()
    }

    /// Time left until the oldest visible toast expires, if any is showing.
    pub fn next_expiry(&self) -> Option<Duration> {
        let now = self.clock.now();
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state
            .toasts
            .iter()
            .map(|t| now.saturating_sub(t.shown_at))
            .filter(|age| *age < self.ttl)
            .map(|age| self.ttl - age)
            .min()
    }

    pub fn dismiss(&self, id: ToastId) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let before = state.toasts.len();
        state.toasts.retain(|t| t.id != id);
        state.toasts.len() != before
    }
}

impl<C: Clock> Notifier for ToastTray<C> {
    fn notify(&self, notification: Notification) {
        tracing::info!(
            title = %notification.title,
            severity = ?notification.severity,
            "{}",
            notification.description
        );
        let shown_at = self.clock.now();
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let id = ToastId(state.next_id);
        state.next_id += 1;
        state.toasts.push_front(Toast {
            id,
            notification,
            shown_at,
        });
        state.toasts.truncate(self.limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn tray(clock: &ManualClock) -> ToastTray<ManualClock> {
        ToastTray::new(clock.clone(), 2, Duration::from_secs(5))
    }

    #[test]
    fn newest_toast_is_first_and_limit_drops_oldest() {
        let clock = ManualClock::new();
        let tray = tray(&clock);
        tray.notify(Notification::new("one", ""));
        tray.notify(Notification::new("two", ""));
        tray.notify(Notification::new("three", ""));

        let titles: Vec<_> = tray
            .visible()
            .into_iter()
            .map(|t| t.notification.title)
            .collect();
        assert_eq!(titles, vec!["three", "two"]);
    }

    #[test]
    fn toasts_expire_after_ttl() {
        let clock = ManualClock::new();
        let tray = tray(&clock);
        tray.notify(Notification::new("first", ""));
        clock.advance(Duration::from_secs(3));
        tray.notify(Notification::new("second", ""));

        clock.advance(Duration::from_secs(2));
        let visible = tray.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].notification.title, "second");

        clock.advance(Duration::from_secs(3));
        assert!(tray.visible().is_empty());
    }

    #[test]
    fn next_expiry_tracks_oldest_visible_toast() {
        let clock = ManualClock::new();
        let tray = tray(&clock);
        assert_eq!(tray.next_expiry(), None);

        tray.notify(Notification::new("first", ""));
        clock.advance(Duration::from_secs(2));
        tray.notify(Notification::new("second", ""));
        assert_eq!(tray.next_expiry(), Some(Duration::from_secs(3)));

        // A refresh that fires a little early still sees the toast and can
        // wait out the remainder.
        clock.advance(Duration::from_millis(2_999));
        assert_eq!(tray.visible().len(), 2);
        assert_eq!(tray.next_expiry(), Some(Duration::from_millis(1)));

        clock.advance(Duration::from_millis(1));
        assert_eq!(tray.visible().len(), 1);
        assert_eq!(tray.next_expiry(), Some(Duration::from_secs(2)));

        clock.advance(Duration::from_secs(2));
        assert_eq!(tray.next_expiry(), None);
    }

    #[test]
    fn dismiss_removes_single_toast() {
        let clock = ManualClock::new();
        let tray = tray(&clock);
        tray.notify(Notification::destructive("sos", "sent"));
        let id = tray.visible()[0].id;
        assert!(tray.dismiss(id));
        assert!(!tray.dismiss(id));
        assert!(tray.visible().is_empty());
    }
}
