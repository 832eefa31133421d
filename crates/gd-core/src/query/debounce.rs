//! Debounced input
//!
//! Every push restarts the delay; only the last value pushed before the
//! input goes quiet is released. Time is passed in by the caller so the
//! debouncer can sit inside any event loop.

use std::time::{Duration, Instant};

/// Default quiet period for search boxes
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Monotonic revision of the debounced input
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Revision(pub u64);

#[derive(Debug)]
struct Pending<T> {
    value: T,
    revision: Revision,
    deadline: Instant,
}

/// Cancel-and-restart debouncer
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
    revision: u64,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            revision: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a new input value, replacing any pending one
    pub fn push(&mut self, value: T, now: Instant) -> Revision {
        self.revision += 1;
        let revision = Revision(self.revision);
        self.pending = Some(Pending {
            value,
            revision,
            deadline: now + self.delay,
        });
        revision
    }

    /// Release the pending value once the delay has passed since the last push
    pub fn poll(&mut self, now: Instant) -> Option<(Revision, T)> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|p| now >= p.deadline);
        if !due {
            return None;
        }
        self.pending.take().map(|p| (p.revision, p.value))
    }

    /// When the pending value becomes due
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending value without releasing it
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Latest revision handed out by [`push`](Self::push)
    pub fn revision(&self) -> Revision {
        Revision(self.revision)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
