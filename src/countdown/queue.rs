//! Delivery of ticks from a countdown back to the engine.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use super::Tick;

/// Where a running countdown sends its ticks.
pub type TickSink = Arc<dyn Fn(Tick) + Send + Sync>;

/// FIFO of ticks waiting to be applied to the engine.
///
/// Clones share the same queue.
#[derive(Clone, Debug, Default)]
pub struct TickQueue {
    pending: Arc<Mutex<VecDeque<Tick>>>,
}

impl TickQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, tick: Tick) {
        self.pending.lock().push_back(tick);
    }

    /// Take the oldest pending tick.
    pub fn pop(&self) -> Option<Tick> {
        self.pending.lock().pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }

    /// A sink that appends to this queue.
    #[must_use]
    pub fn sink(&self) -> TickSink {
        let queue = self.clone();
        Arc::new(move |tick| queue.push(tick))
    }
}
