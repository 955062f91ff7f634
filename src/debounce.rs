//! Trailing-edge debouncing of callbacks
//!
//! A [`Debouncer`] owns a single pending slot. Scheduling a callback cancels whatever
//! was pending, so a burst of calls collapses into one invocation of the last
//! callback once input has been quiet for the requested delay.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::trace;

struct Pending {
    id: u64,
    timer: JoinHandle<()>,
}

#[derive(Default)]
struct Slot {
    next_id: u64,
    pending: Option<Pending>,
}

impl Slot {
    fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                pending.timer.abort();
                trace!(id = pending.id, "Cancelled pending callback");
                true
            }
            None => false,
        }
    }

    /// Release the slot if `id` still owns it
    fn claim(&mut self, id: u64) -> bool {
        if self.pending.as_ref().is_some_and(|p| p.id == id) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}

/// Delays a callback until calls stop arriving
///
/// Timers run on the ambient tokio runtime, so [`Debouncer::schedule`] must be
/// called from within one.
#[derive(Default)]
pub struct Debouncer {
    slot: Arc<Mutex<Slot>>,
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Debouncer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `callback` after `delay` unless another call to `schedule` or
    /// [`cancel_pending`](Self::cancel_pending) comes first.
    pub fn schedule<F>(&self, callback: F, delay: Duration)
    where
        F: FnOnce() + Send + 'static,
    {
        // The slot stays locked until the new timer is stored, so the timer
        // can never observe the slot before it owns it.
        let mut slot = lock(&self.slot);
        slot.cancel();

        slot.next_id += 1;
        let id = slot.next_id;
        let shared = Arc::clone(&self.slot);

        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if lock(&shared).claim(id) {
                trace!(id, "Firing debounced callback");
                callback();
            }
        });

        trace!(id, delay_ms = delay.as_millis() as u64, "Scheduled callback");
        slot.pending = Some(Pending { id, timer });
    }

    /// Drop the pending callback, if any. Returns whether one was pending.
    pub fn cancel_pending(&self) -> bool {
        lock(&self.slot).cancel()
    }

    /// Whether a callback is waiting to fire
    #[must_use]
    pub fn is_pending(&self) -> bool {
        lock(&self.slot).pending.is_some()
    }
}

/// Holds back a callback until input settles
///
/// [`Debouncer`] is the tokio-backed implementation; hosts with their own event
/// loop can supply another.
pub trait Debounce: Send + Sync {
    /// Replace any pending callback with `callback`, due after `delay`
    fn schedule_boxed(&self, callback: Box<dyn FnOnce() + Send>, delay: Duration);

    /// Drop the pending callback, if any. Returns whether one was pending.
    fn cancel_pending(&self) -> bool;

    fn is_pending(&self) -> bool;
}

impl Debounce for Debouncer {
    fn schedule_boxed(&self, callback: Box<dyn FnOnce() + Send>, delay: Duration) {
        Debouncer::schedule(self, callback, delay);
    }

    fn cancel_pending(&self) -> bool {
        Debouncer::cancel_pending(self)
    }

    fn is_pending(&self) -> bool {
        Debouncer::is_pending(self)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        lock(&self.slot).cancel();
    }
}
