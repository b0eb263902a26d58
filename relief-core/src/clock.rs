//! Time sources and delayed-message scheduling.
//!
//! Clocks report elapsed time since their own origin, so the same code runs
//! against a real monotonic clock, a browser clock, or a manually advanced one.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

pub trait Clock {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;
}

#[derive(Clone, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    elapsed: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        let mut guard = self.elapsed.lock().unwrap_or_else(PoisonError::into_inner);
        *guard += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.elapsed.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Delivers a message back to the update loop after a delay.
pub trait Timer<M> {
    fn schedule(&mut self, after: Duration, message: M) -> TimerId;

    /// Returns false when the timer already fired or was never scheduled.
    fn cancel(&mut self, id: TimerId) -> bool;
}

#[derive(Debug)]
struct Scheduled<M> {
    id: TimerId,
    deadline: Duration,
    message: M,
}

/// Timer driven by a [`ManualClock`]; due messages are collected explicitly.
#[derive(Debug)]
pub struct ManualTimer<M> {
    clock: ManualClock,
    next_id: u64,
    pending: Vec<Scheduled<M>>,
}

impl<M> ManualTimer<M> {
    pub fn new(clock: ManualClock) -> Self {
        Self {
            clock,
            next_id: 1,
            pending: Vec::new(),
        }
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Removes and returns every message whose deadline has passed, earliest first.
    pub fn take_due(&mut self) -> Vec<(TimerId, M)> {
        let now = self.clock.now();
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|s| s.deadline <= now);
        self.pending = rest;
        due.sort_by_key(|s| (s.deadline, s.id));
        due.into_iter().map(|s| (s.id, s.message)).collect()
    }
}

impl<M> Timer<M> for ManualTimer<M> {
    fn schedule(&mut self, after: Duration, message: M) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Scheduled {
            id,
            deadline: self.clock.now() + after,
            message,
        });
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.id != id);
        self.pending.len() != before
    }
}
