//! Deferred Task Scheduling
//!
//! The widget is driven by a single-threaded host loop. Work that must run
//! "on the next tick" or after a caller-chosen delay is queued here as data
//! and executed when the host calls [`crate::Widget::tick`] or
//! [`crate::Widget::advance`]. Queued tasks cannot be cancelled.

use std::time::Duration;

/// Work the widget can defer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Empty the input control.
    ///
    /// With `unless_edited_since` set, the clear is skipped when the input
    /// has been edited by keystrokes after that revision.
    ClearInput { unless_edited_since: Option<u64> },
    /// Remove every transcript line
    ClearScreen,
    /// Recompute the input control layout
    ResizeInput,
}

#[derive(Debug, Clone)]
struct Scheduled {
    due: Duration,
    seq: u64,
    task: Task,
}

/// Task queue with a virtual clock
#[derive(Debug, Default)]
pub struct Scheduler {
    /// Time elapsed since the scheduler was created
    now: Duration,
    /// Monotonic counter used to keep FIFO order among equal due times
    next_seq: u64,
    queue: Vec<Scheduled>,
}

impl Scheduler {
    /// Create an empty scheduler at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a task to run `delay` after the current time
    pub fn schedule(&mut self, delay: Duration, task: Task) {
        let seq = self.next_seq;
        self.next_seq += 1;
        trace!("scheduling {:?} in {:?} (seq {})", task, delay, seq);
        self.queue.push(Scheduled {
            due: self.now + delay,
            seq,
            task,
        });
    }

    /// Queue a task for the next tick
    pub fn defer(&mut self, task: Task) {
        self.schedule(Duration::ZERO, task);
    }

    /// Move the clock forward
    pub fn advance(&mut self, elapsed: Duration) {
        self.now += elapsed;
    }

    /// Remove and return every task that is due, in execution order
    pub fn take_due(&mut self) -> Vec<Task> {
        let now = self.now;
        let (mut due, pending): (Vec<Scheduled>, Vec<Scheduled>) =
            self.queue.drain(..).partition(|item| item.due <= now);
        self.queue = pending;
        due.sort_by_key(|item| (item.due, item.seq));
        due.into_iter().map(|item| item.task).collect()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of queued tasks
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Time until the earliest queued task, if any
    pub fn next_due_in(&self) -> Option<Duration> {
        self.queue
            .iter()
            .map(|item| item.due.saturating_sub(self.now))
            .min()
    }
}
