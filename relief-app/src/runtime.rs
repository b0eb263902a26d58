//! Live console session on the system clock.
//!
//! Input lines and fired timers share one channel, so the dashboard is only
//! ever touched from the loop thread.

use crate::commands::{self, LineCommand, HELP};
use crate::state::AppState;
use relief_core::{dto, Message, Runtime, SystemClock, Timer, TimerId, ToastTray};
use std::collections::HashSet;
use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

#[derive(Debug)]
pub enum LiveEvent {
    Line(String),
    Timer(TimerId, Message),
    InputClosed,
}

/// Timer that sleeps on its own thread and posts the message back to the loop.
pub struct ThreadTimer {
    tx: Sender<LiveEvent>,
    next_id: u64,
    armed: Arc<Mutex<HashSet<TimerId>>>,
}

impl ThreadTimer {
    pub fn new(tx: Sender<LiveEvent>) -> Self {
        Self {
            tx,
            next_id: 1,
            armed: Arc::new(Mutex::new(HashSet::new())),
        }
    }
}

impl Timer<Message> for ThreadTimer {
    fn schedule(&mut self, after: Duration, message: Message) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.armed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id);

        let tx = self.tx.clone();
        let armed = Arc::clone(&self.armed);
        std::thread::spawn(move || {
            std::thread::sleep(after);
            let still_armed = armed
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&id);
            if still_armed {
                let _ = tx.send(LiveEvent::Timer(id, message));
            }
        });
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.armed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
    }
}

pub type LiveRuntime = Runtime<ToastTray<SystemClock>, ThreadTimer>;

pub fn live_runtime(state: &AppState, tx: Sender<LiveEvent>) -> LiveRuntime {
    Runtime::new(
        relief_core::DashboardModel::new(&state.config),
        state.tray(SystemClock::new()),
        ThreadTimer::new(tx),
    )
}

/// Runs the console until `quit` or end of input.
pub fn run_interactive<R, W>(state: &AppState, input: R, out: &mut W) -> anyhow::Result<()>
where
    R: BufRead + Send + 'static,
    W: Write,
{
    let (tx, rx) = mpsc::channel();
    let mut rt = live_runtime(state, tx.clone());

    std::thread::spawn(move || {
        for line in input.lines() {
            let Ok(line) = line else { break };
            if tx.send(LiveEvent::Line(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(LiveEvent::InputClosed);
    });

    writeln!(out, "relief console ready; type 'help' for commands")?;
    while let Ok(event) = rx.recv() {
        match event {
            LiveEvent::Timer(id, message) => rt.on_timer(id, message),
            LiveEvent::InputClosed => break,
            LiveEvent::Line(line) => match commands::parse_line(&line) {
                Ok(None) => {}
                Ok(Some(LineCommand::Dispatch(message))) => {
                    let before = rt.notifier().visible().first().map(|t| t.id);
                    rt.dispatch(message);
                    if let Some(toast) = rt.notifier().visible().first() {
                        if Some(toast.id) != before {
                            writeln!(
                                out,
                                "{} {}",
                                toast.notification.title, toast.notification.description
                            )?;
                        }
                    }
                }
                Ok(Some(LineCommand::Show)) => {
                    let snapshot = dto::dashboard(rt.model(), &rt.notifier().visible());
                    writeln!(out, "{}", serde_json::to_string_pretty(&snapshot)?)?;
                }
                Ok(Some(LineCommand::Help)) => writeln!(out, "{HELP}")?,
                Ok(Some(LineCommand::Quit)) => break,
                Err(err) => writeln!(out, "error: {err}")?,
            },
        }
    }

    rt.shutdown();
    Ok(())
}
