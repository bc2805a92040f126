//! Countdown: the only source of asynchronous activity in a round.
//!
//! A countdown delivers `n, n-1, ..., 0` to its callback, one value per
//! second, then stops on its own. Every value is delivered, so the final
//! `0` is never skipped and expiry fires exactly once downstream.
//!
//! ## Implementations
//!
//! - [`ManualCountdown`]: simulated seconds, advanced by the caller.
//!   Deterministic; used by tests and hosts with their own frame clock.
//! - [`TokioCountdown`]: a cancellable tokio task ticking on
//!   `tokio::time::interval`.
//!
//! ## Ownership
//!
//! `start` returns a [`CancelHandle`]. The round engine holds at most one
//! per round and cancels it on every termination path; the handle also
//! cancels itself when dropped.
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use flag_quiz::countdown::{Countdown, ManualCountdown};
//!
//! let clock = ManualCountdown::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//!
//! let _handle = clock.start(2, Box::new(move |remaining| sink.lock().unwrap().push(remaining)));
//! clock.advance();
//! clock.advance();
//!
//! assert_eq!(*seen.lock().unwrap(), vec![2, 1, 0]);
//! assert_eq!(clock.active_timers(), 0);
//! ```

mod handle;
mod manual;
mod queue;
mod realtime;

pub use handle::{CancelHandle, CancelToken};
pub use manual::ManualCountdown;
pub use queue::{TickQueue, TickSink};
pub use realtime::TokioCountdown;

use serde::{Deserialize, Serialize};

use crate::round::RoundId;

/// Callback receiving the remaining seconds.
pub type TickCallback = Box<dyn FnMut(u32) + Send + 'static>;

/// One countdown tick, addressed to the round that started it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tick {
    pub round: RoundId,
    pub remaining: u32,
}

/// A cooperative ticking clock.
pub trait Countdown: Send + Sync {
    /// Start counting down from `initial_seconds` to 0 inclusive.
    ///
    /// `on_tick` receives `initial_seconds` right away, then one value per
    /// second. Starting a second countdown for a round whose previous
    /// handle is still live is a caller error.
    fn start(&self, initial_seconds: u32, on_tick: TickCallback) -> CancelHandle;

    /// Stop delivering ticks. Idempotent, and safe after natural completion.
    fn cancel(&self, handle: &CancelHandle) {
        handle.cancel();
    }
}
