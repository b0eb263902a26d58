use crate::clock::{ManualTimer, Timer, TimerId};
use crate::dashboard::{update, Command, DashboardModel, Message};
use crate::notify::Notifier;
use std::collections::BTreeSet;
use std::time::Duration;

/// Drives the dashboard: applies messages and executes the resulting commands
/// against the injected notifier and timer.
pub struct Runtime<N, T> {
    model: DashboardModel,
    notifier: N,
    timer: T,
    pending: BTreeSet<TimerId>,
}

impl<N, T> Runtime<N, T>
where
    N: Notifier,
    T: Timer<Message>,
{
    pub fn new(model: DashboardModel, notifier: N, timer: T) -> Self {
        Self {
            model,
            notifier,
            timer,
            pending: BTreeSet::new(),
        }
    }

    pub fn model(&self) -> &DashboardModel {
        &self.model
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Scheduled messages that have neither fired nor been cancelled.
    pub fn pending_timers(&self) -> usize {
        self.pending.len()
    }

    pub fn dispatch(&mut self, message: impl Into<Message>) {
        let commands = update(&mut self.model, message.into());
        for command in commands {
            self.execute(command);
        }
    }

    /// Entry point for a timer that fired.
    pub fn on_timer(&mut self, id: TimerId, message: Message) {
        if !self.pending.remove(&id) {
            tracing::debug!(timer = id.0, "dropping message from cancelled timer");
            return;
        }
        self.dispatch(message);
    }

    /// Cancels every outstanding timer.
    pub fn shutdown(&mut self) {
        for id in std::mem::take(&mut self.pending) {
            if self.timer.cancel(id) {
                tracing::debug!(timer = id.0, "cancelled pending timer");
            }
        }
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::Notify(notification) => self.notifier.notify(notification),
            Command::Schedule { after, message } => {
                tracing::debug!(?after, message = message.name(), "scheduling message");
                let id = self.timer.schedule(after, message);
                self.pending.insert(id);
            }
        }
    }
}

impl<N: Notifier> Runtime<N, ManualTimer<Message>> {
    /// Moves the manual clock forward and delivers every message that came due.
    pub fn advance(&mut self, by: Duration) {
        self.timer.clock().advance(by);
        loop {
            let due = self.timer.take_due();
            if due.is_empty() {
                break;
            }
            for (id, message) in due {
                self.on_timer(id, message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::notify::Notification;
    use crate::sos::SosMessage;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CaptureNotifier {
        seen: Arc<Mutex<Vec<Notification>>>,
    }

    impl Notifier for CaptureNotifier {
        fn notify(&self, notification: Notification) {
            if let Ok(mut guard) = self.seen.lock() {
                guard.push(notification);
            }
        }
    }

    fn runtime() -> (Runtime<CaptureNotifier, ManualTimer<Message>>, CaptureNotifier) {
        let notifier = CaptureNotifier::default();
        let timer = ManualTimer::new(ManualClock::new());
        (
            Runtime::new(DashboardModel::default(), notifier.clone(), timer),
            notifier,
        )
    }

    #[test]
    fn sos_rearms_after_delay() {
        let (mut rt, notifier) = runtime();
        rt.dispatch(SosMessage::Press);
        assert!(!rt.model().sos.is_enabled());
        assert_eq!(rt.pending_timers(), 1);

        rt.advance(Duration::from_millis(2_999));
        assert!(!rt.model().sos.is_enabled());

        rt.advance(Duration::from_millis(1));
        assert!(rt.model().sos.is_enabled());
        assert_eq!(rt.pending_timers(), 0);
        assert_eq!(notifier.seen.lock().expect("lock").len(), 1);
    }

    #[test]
    fn shutdown_cancels_scheduled_reset() {
        let (mut rt, _notifier) = runtime();
        rt.dispatch(SosMessage::Press);
        rt.shutdown();
        assert_eq!(rt.timer().pending(), 0);

        rt.advance(Duration::from_secs(10));
        assert!(!rt.model().sos.is_enabled());
    }

    #[test]
    fn message_from_unknown_timer_is_dropped() {
        let (mut rt, _notifier) = runtime();
        rt.dispatch(SosMessage::Press);
        rt.on_timer(TimerId(99), SosMessage::Reset { generation: 1 }.into());
        assert!(!rt.model().sos.is_enabled());
    }
}
