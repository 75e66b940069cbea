//! Delivery of view updates.
//!
//! The presenter never calls a view directly: it posts each update through a
//! [`UiDispatcher`]. [`ImmediateDispatcher`] runs updates inline, which keeps
//! every presenter operation fully synchronous. [`QueuedDispatcher`] parks
//! them until the owner drains the queue, the way a UI main loop would.

use std::collections::VecDeque;

use parking_lot::Mutex;
use tracing::trace;

/// A deferred view update.
pub type UiTask = Box<dyn FnOnce() + Send + 'static>;

pub trait UiDispatcher: Send + Sync {
    fn dispatch(&self, task: UiTask);
}

/// Runs every task on the spot.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateDispatcher;

impl UiDispatcher for ImmediateDispatcher {
    fn dispatch(&self, task: UiTask) {
        task();
    }
}

/// FIFO of tasks executed by [`QueuedDispatcher::drain`].
#[derive(Default)]
pub struct QueuedDispatcher {
    queue: Mutex<VecDeque<UiTask>>,
}

impl QueuedDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    /// Run queued tasks in order, including ones enqueued while draining.
    /// Returns how many ran.
    pub fn drain(&self) -> usize {
        let mut ran = 0;
        loop {
            // Lock is released before the task runs; tasks may dispatch again.
            let next = self.queue.lock().pop_front();
            let Some(task) = next else { break };
            task();
            ran += 1;
        }
        trace!(ran, "ui queue drained");
        ran
    }
}

impl UiDispatcher for QueuedDispatcher {
    fn dispatch(&self, task: UiTask) {
        self.queue.lock().push_back(task);
    }
}

impl std::fmt::Debug for QueuedDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueuedDispatcher")
            .field("pending", &self.pending())
            .finish()
    }
}
