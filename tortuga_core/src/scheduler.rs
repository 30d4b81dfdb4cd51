// Copyright 2026 the Tortuga Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred render execution bound to the host's display cadence.
//!
//! A [`RenderScheduler`] accepts a [`RenderTask`] and runs it once, at the
//! host's next tick (one display refresh, or whatever periodic callback the
//! host provides). Tasks run in the order they were scheduled.
//!
//! The scheduler does not deduplicate: the compositor's
//! [`DirtyFlag`](crate::dirty::DirtyFlag) guarantees it never has more than
//! one render outstanding.
//!
//! [`ManualScheduler`] is a step-driven implementation for tests and headless
//! hosts. Platform backends provide their own (e.g. a
//! `requestAnimationFrame` scheduler on the web).

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};
use core::fmt;

/// A callback to run once at the next tick.
pub type RenderTask = Box<dyn FnOnce()>;

/// Runs tasks once, at the host's next tick.
pub trait RenderScheduler {
    /// Queues `task` to run at the next tick.
    fn schedule(&self, task: RenderTask);
}

/// A scheduler whose ticks are driven explicitly by calling
/// [`tick`](Self::tick).
///
/// Clones share the same queue, so a host can keep one handle to drive ticks
/// while the compositor holds another to schedule work.
///
/// ```rust
/// use tortuga_core::scheduler::{ManualScheduler, RenderScheduler};
///
/// let scheduler = ManualScheduler::new();
/// scheduler.schedule(Box::new(|| {}));
/// assert_eq!(scheduler.pending(), 1);
/// assert_eq!(scheduler.tick(), 1);
/// assert_eq!(scheduler.pending(), 0);
/// ```
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<ManualInner>,
}

#[derive(Default)]
struct ManualInner {
    queue: RefCell<VecDeque<RenderTask>>,
    ticks: Cell<u64>,
}

impl ManualScheduler {
    /// Creates a scheduler with an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances one tick, running every task queued before the call.
    ///
    /// Tasks scheduled while the tick is running wait for the following tick.
    /// Returns the number of tasks that ran.
    pub fn tick(&self) -> usize {
        self.inner.ticks.set(self.inner.ticks.get() + 1);

        // Take the batch first so tasks are free to schedule more work.
        let batch: VecDeque<RenderTask> = self.inner.queue.take();
        let ran = batch.len();
        for task in batch {
            task();
        }
        ran
    }

    /// Returns the number of tasks waiting for the next tick.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.queue.borrow().len()
    }

    /// Returns how many ticks have elapsed.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.inner.ticks.get()
    }
}

impl RenderScheduler for ManualScheduler {
    fn schedule(&self, task: RenderTask) {
        self.inner.queue.borrow_mut().push_back(task);
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("pending", &self.pending())
            .field("ticks", &self.ticks())
            .finish()
    }
}
