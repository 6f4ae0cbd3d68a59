//! Manually advanced scheduler.
//!
//! For hosts that drive their own event loop, and for deterministic tests.
//! Time only moves when [`TimerQueue::advance`] is called. Tasks run in
//! deadline order, ties broken by scheduling order, and may schedule further
//! tasks; those run within the same `advance` call if they fall due before its
//! end.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::time::Duration;

use crate::host::Scheduler;

struct Pending {
    due: Duration,
    seq: u64,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
pub struct TimerQueue {
    now: Cell<Duration>,
    next_seq: Cell<u64>,
    pending: RefCell<Vec<Pending>>,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Time remaining until the earliest pending task.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        let now = self.now.get();
        self.pending
            .borrow()
            .iter()
            .map(|p| p.due.saturating_sub(now))
            .min()
    }

    /// Move time forward by `by`, running every task that falls due.
    /// Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now.get().saturating_add(by);
        let mut ran = 0;

        while let Some(next) = self.pop_due(target) {
            if next.due > self.now.get() {
                self.now.set(next.due);
            }
            (next.task)();
            ran += 1;
        }

        self.now.set(target);
        ran
    }

    fn pop_due(&self, target: Duration) -> Option<Pending> {
        let mut pending = self.pending.borrow_mut();
        let idx = pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= target)
            .min_by_key(|(_, p)| (p.due, p.seq))
            .map(|(idx, _)| idx)?;
        Some(pending.swap_remove(idx))
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq.wrapping_add(1));
        self.pending.borrow_mut().push(Pending {
            due: self.now.get().saturating_add(delay),
            seq,
            task,
        });
    }
}

impl fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerQueue")
            .field("now", &self.now.get())
            .field("pending", &self.pending())
            .finish()
    }
}
