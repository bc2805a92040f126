//! Simulated-seconds countdown driven by the caller.

use std::sync::Arc;

use parking_lot::Mutex;

use super::{CancelHandle, CancelToken, Countdown, TickCallback};

struct ManualTimer {
    /// Next value to deliver.
    next: u32,
    token: CancelToken,
    on_tick: TickCallback,
}

/// Cooperative countdown clock. One call to [`advance`](Self::advance)
/// is one simulated second.
///
/// Clones share the same timers, so a test can hand one clone to the
/// engine and keep another to drive time.
///
/// Callbacks run while the clock's timer list is locked; a callback must
/// not start or advance countdowns on the same clock.
#[derive(Clone, Default)]
pub struct ManualCountdown {
    timers: Arc<Mutex<Vec<ManualTimer>>>,
}

impl ManualCountdown {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Let one second pass: every live timer receives its next value.
    ///
    /// Returns the number of ticks delivered.
    pub fn advance(&self) -> usize {
        let mut delivered = 0;
        self.timers.lock().retain_mut(|timer| {
            if timer.token.is_cancelled() {
                return false;
            }
            (timer.on_tick)(timer.next);
            delivered += 1;
            if timer.next == 0 {
                false
            } else {
                timer.next -= 1;
                true
            }
        });
        delivered
    }

    /// Let `seconds` pass. Returns the total number of ticks delivered.
    pub fn advance_by(&self, seconds: u32) -> usize {
        (0..seconds).map(|_| self.advance()).sum()
    }

    /// Timers that are neither finished nor cancelled.
    #[must_use]
    pub fn active_timers(&self) -> usize {
        self.timers
            .lock()
            .iter()
            .filter(|timer| !timer.token.is_cancelled())
            .count()
    }
}

impl Countdown for ManualCountdown {
    fn start(&self, initial_seconds: u32, mut on_tick: TickCallback) -> CancelHandle {
        let handle = CancelHandle::new();
        on_tick(initial_seconds);
        let mut timers = self.timers.lock();
        timers.retain(|timer| !timer.token.is_cancelled());
        if initial_seconds > 0 {
            timers.push(ManualTimer {
                next: initial_seconds - 1,
                token: handle.token(),
                on_tick,
            });
        }
        handle
    }
}

impl std::fmt::Debug for ManualCountdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualCountdown")
            .field("active_timers", &self.active_timers())
            .finish()
    }
}
