//! Deferred task scheduling for toast removal.
//!
//! The browser implementation lives in `browser::TimeoutScheduler`.
//! `ManualScheduler` is a virtual clock for native callers and tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod scheduler_test;

/// Runs a task once after a delay.
pub trait Scheduler {
    type Timer: TimerHandle + 'static;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Self::Timer;
}

/// Handle to a scheduled task. Dropping the handle leaves the task scheduled.
pub trait TimerHandle {
    /// Prevent the task from running. No-op if it already ran.
    fn cancel(self);
}

struct ManualTask {
    due: Duration,
    seq: u64,
    cancelled: Rc<Cell<bool>>,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct ManualQueue {
    now: Duration,
    seq: u64,
    tasks: Vec<ManualTask>,
}

/// Virtual-clock scheduler. Time only moves when `advance` is called.
/// Clones share one clock and queue.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<ManualQueue>>,
}

/// Cancellation handle for a `ManualScheduler` task.
#[derive(Debug)]
pub struct ManualTimer {
    cancelled: Rc<Cell<bool>>,
}

impl TimerHandle for ManualTimer {
    fn cancel(self) {
        self.cancelled.set(true);
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.queue.borrow().now
    }

    /// Tasks scheduled and not cancelled.
    pub fn pending(&self) -> usize {
        self.queue.borrow().tasks.iter().filter(|t| !t.cancelled.get()).count()
    }

    /// Move the clock forward, running every due task in deadline order
    /// (ties in scheduling order). Tasks scheduled by running tasks are
    /// picked up if they fall due within the same window. Returns the
    /// number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now() + by;
        let mut ran = 0;
        while let Some(task) = self.pop_due(target) {
            (task.task)();
            ran += 1;
        }
        ran
    }

    fn pop_due(&self, target: Duration) -> Option<ManualTask> {
        let mut queue = self.queue.borrow_mut();
        queue.tasks.retain(|t| !t.cancelled.get());
        let next = queue
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= target)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(i, _)| i);
        match next {
            Some(index) => {
                let task = queue.tasks.remove(index);
                queue.now = task.due;
                Some(task)
            }
            None => {
                queue.now = target;
                None
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    type Timer = ManualTimer;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> ManualTimer {
        let mut queue = self.queue.borrow_mut();
        let cancelled = Rc::new(Cell::new(false));
        let due = queue.now + delay;
        let seq = queue.seq;
        queue.seq += 1;
        queue.tasks.push(ManualTask { due, seq, cancelled: Rc::clone(&cancelled), task });
        ManualTimer { cancelled }
    }
}
