//! Wall-clock countdown backed by a tokio task.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::time::MissedTickBehavior;

use super::{CancelHandle, Countdown, TickCallback};
use crate::core::{QuizError, Result};

/// Countdown that ticks on a tokio runtime.
///
/// Each `start` spawns one task that waits on `tokio::time::interval`
/// between ticks. Cancelling the handle aborts the task.
#[derive(Clone, Debug)]
pub struct TokioCountdown {
    runtime: Handle,
    period: Duration,
}

impl TokioCountdown {
    /// Tick every `period` on the given runtime. A zero period is raised to 1ms.
    #[must_use]
    pub fn new(runtime: Handle, period: Duration) -> Self {
        Self {
            runtime,
            period: period.max(Duration::from_millis(1)),
        }
    }

    /// One tick per second on the runtime this is called from.
    pub fn current() -> Result<Self> {
        Self::current_with_period(Duration::from_secs(1))
    }

    /// Tick every `period` on the runtime this is called from.
    pub fn current_with_period(period: Duration) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|_| QuizError::NoRuntime)?;
        Ok(Self::new(runtime, period))
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Countdown for TokioCountdown {
    fn start(&self, initial_seconds: u32, mut on_tick: TickCallback) -> CancelHandle {
        let handle = CancelHandle::new();
        let token = handle.token();
        let period = self.period;

        let task = self.runtime.spawn(async move {
            let mut interval = tokio::time::interval(period);
            // Late ticks shift the schedule; values are never skipped.
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            for remaining in (0..=initial_seconds).rev() {
                interval.tick().await;
                if token.is_cancelled() {
                    return;
                }
                on_tick(remaining);
            }
        });

        handle.attach_task(task.abort_handle());
        handle
    }
}
