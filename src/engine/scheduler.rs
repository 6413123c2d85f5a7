//! Time source and tick scheduling primitives for the UI-thread loop.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Simulated clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut guard = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *guard += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// "Call me back after `delay`" primitive of the host's event loop.
///
/// Implementations post onto the UI thread's queue and may be invoked from any
/// thread. At most one tick is outstanding; `cancel` drops it.
pub trait TickScheduler: Send + Sync {
    fn schedule(&self, delay: Duration);
    fn cancel(&self);
}

/// Single-slot scheduler polled by the owner of the event loop.
///
/// Overlapping requests keep the earliest deadline.
#[derive(Clone)]
pub struct TickQueue {
    clock: Arc<dyn Clock>,
    deadline: Arc<Mutex<Option<Instant>>>,
}

impl TickQueue {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            deadline: Arc::new(Mutex::new(None)),
        }
    }

    pub fn pending(&self) -> Option<Instant> {
        *self.deadline.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn has_pending(&self) -> bool {
        self.pending().is_some()
    }

    /// Consumes the outstanding tick when its deadline has passed.
    pub fn take_due(&self, now: Instant) -> bool {
        let mut guard = self.deadline.lock().unwrap_or_else(PoisonError::into_inner);
        match *guard {
            Some(deadline) if deadline <= now => {
                *guard = None;
                true
            }
            _ => false,
        }
    }
}

impl TickScheduler for TickQueue {
    fn schedule(&self, delay: Duration) {
        let requested = self.clock.now() + delay;
        let mut guard = self.deadline.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(match *guard {
            Some(existing) => existing.min(requested),
            None => requested,
        });
    }

    fn cancel(&self) {
        *self.deadline.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl std::fmt::Debug for TickQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickQueue")
            .field("deadline", &self.pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_becomes_due_after_delay() {
        let clock = ManualClock::new();
        let queue = TickQueue::new(Arc::new(clock.clone()));

        queue.schedule(Duration::from_millis(16));
        assert!(!queue.take_due(clock.now()));

        clock.advance(Duration::from_millis(16));
        assert!(queue.take_due(clock.now()));
        assert!(!queue.has_pending());
    }

    #[test]
    fn earliest_request_wins() {
        let clock = ManualClock::new();
        let queue = TickQueue::new(Arc::new(clock.clone()));

        queue.schedule(Duration::from_millis(16));
        queue.schedule(Duration::ZERO);
        assert!(queue.take_due(clock.now()));
    }

    #[test]
    fn cancel_clears_the_slot() {
        let clock = ManualClock::new();
        let queue = TickQueue::new(Arc::new(clock.clone()));

        queue.schedule(Duration::ZERO);
        queue.cancel();
        assert!(!queue.take_due(clock.now()));
    }
}
