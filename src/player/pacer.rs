/*!
 * Scheduling primitive for silences.
 *
 * The sequencer never sleeps directly; it asks a `Pacer` to wait. The real
 * pacer blocks the thread and wakes up early when its `CancelToken` fires.
 */

use std::sync::Arc;
use std::time::{Duration, Instant};
use parking_lot::{Condvar, Mutex};

/// Outcome of a pause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    /// The full duration elapsed
    Elapsed,
    /// The wait was cut short by cancellation
    Cancelled,
}

/// Something that can wait out a silence
pub trait Pacer {
    /// Wait for `duration`; a zero duration returns immediately
    fn pause(&mut self, duration: Duration) -> Pause;

    /// Whether playback should stop
    fn is_cancelled(&self) -> bool {
        false
    }
}

#[derive(Debug, Default)]
struct CancelState {
    cancelled: Mutex<bool>,
    wakeup: Condvar,
}

/// Shared cancellation flag that also wakes sleeping pacers
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    state: Arc<CancelState>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation and wake every waiter
    pub fn cancel(&self) {
        *self.state.cancelled.lock() = true;
        self.state.wakeup.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        *self.state.cancelled.lock()
    }

    /// Block up to `duration`; returns true if cancelled meanwhile
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        let mut cancelled = self.state.cancelled.lock();
        while !*cancelled {
            if self.state.wakeup.wait_until(&mut cancelled, deadline).timed_out() {
                break;
            }
        }
        *cancelled
    }
}

/// Pacer that really waits, on the calling thread
#[derive(Debug, Clone, Default)]
pub struct ThreadPacer {
    token: CancelToken,
}

impl ThreadPacer {
    pub fn new(token: CancelToken) -> Self {
        Self { token }
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }
}

impl Pacer for ThreadPacer {
    fn pause(&mut self, duration: Duration) -> Pause {
        if duration.is_zero() {
            return if self.token.is_cancelled() { Pause::Cancelled } else { Pause::Elapsed };
        }
        if self.token.wait_timeout(duration) {
            Pause::Cancelled
        } else {
            Pause::Elapsed
        }
    }

    fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}
