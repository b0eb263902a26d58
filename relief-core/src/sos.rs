use crate::dashboard::{Command, Message};
use crate::notify::Notification;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SosMessage {
    Press,
    /// Scheduled re-arm for the press that produced `generation`.
    Reset { generation: u64 },
}

impl From<SosMessage> for Message {
    fn from(msg: SosMessage) -> Self {
        Message::Sos(msg)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SosState {
    #[default]
    Idle,
    Signaling,
}

/// One-shot emergency control that re-arms itself after a fixed delay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SosTrigger {
    state: SosState,
    generation: u64,
    reset_after: Duration,
}

impl SosTrigger {
    pub fn new(reset_after: Duration) -> Self {
        Self {
            state: SosState::Idle,
            generation: 0,
            reset_after,
        }
    }

    pub fn state(&self) -> SosState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state == SosState::Idle
    }

    pub fn reset_after(&self) -> Duration {
        self.reset_after
    }

    pub fn update(&mut self, msg: SosMessage) -> Vec<Command> {
        match msg {
            SosMessage::Press => {
                if self.state == SosState::Signaling {
                    tracing::debug!("sos already signaling; press ignored");
                    return Vec::new();
                }
                self.state = SosState::Signaling;
                self.generation += 1;
                tracing::warn!(generation = self.generation, "sos signal raised");
                vec![
                    Command::Notify(Notification::destructive(
                        "🚨 SOS SIGNAL SENT",
                        "Emergency responders have been notified of your location.",
                    )),
                    Command::Schedule {
                        after: self.reset_after,
                        message: SosMessage::Reset {
                            generation: self.generation,
                        }
                        .into(),
                    },
                ]
            }
            SosMessage::Reset { generation } => {
                if generation == self.generation && self.state == SosState::Signaling {
                    self.state = SosState::Idle;
                    tracing::debug!(generation, "sos re-armed");
                } else {
                    tracing::debug!(generation, current = self.generation, "stale sos reset ignored");
                }
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_signals_notifies_and_schedules_reset() {
        let mut sos = SosTrigger::new(Duration::from_secs(3));
        let commands = sos.update(SosMessage::Press);

        assert!(!sos.is_enabled());
        assert_eq!(commands.len(), 2);
        assert!(matches!(&commands[0], Command::Notify(n) if n.severity == crate::notify::Severity::Destructive));
        assert!(matches!(
            &commands[1],
            Command::Schedule {
                after,
                message: Message::Sos(SosMessage::Reset { generation: 1 })
            } if *after == Duration::from_secs(3)
        ));
    }

    #[test]
    fn press_while_signaling_is_ignored() {
        let mut sos = SosTrigger::new(Duration::from_secs(3));
        sos.update(SosMessage::Press);
        assert!(sos.update(SosMessage::Press).is_empty());
        assert_eq!(sos.state(), SosState::Signaling);
    }

    #[test]
    fn reset_rearms_only_for_current_generation() {
        let mut sos = SosTrigger::new(Duration::from_secs(3));
        sos.update(SosMessage::Press);
        sos.update(SosMessage::Reset { generation: 0 });
        assert_eq!(sos.state(), SosState::Signaling);

        sos.update(SosMessage::Reset { generation: 1 });
        assert!(sos.is_enabled());

        sos.update(SosMessage::Press);
        sos.update(SosMessage::Reset { generation: 1 });
        assert_eq!(sos.state(), SosState::Signaling);
    }
}
