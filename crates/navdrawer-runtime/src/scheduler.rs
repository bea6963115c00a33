#![forbid(unsafe_code)]

//! Single-queue scheduler for named, deferred tasks.
//!
//! The drawer never blocks. Every piece of deferred work is a task value of
//! a host-defined type `T` queued with a [`Deferral`]:
//!
//! - [`Deferral::NextFrame`] runs on the next render frame
//!   ([`Scheduler::take_frame`]).
//! - [`Deferral::After`] runs once the host clock reaches its deadline
//!   ([`Scheduler::advance_to`]).
//!
//! Time is host-driven: the host reports the monotonic clock through
//! [`Scheduler::advance_to`] and the scheduler never reads a wall clock, so
//! tests are fully deterministic.
//!
//! # Invariants
//!
//! 1. Due tasks are returned in deadline order; ties keep submission order.
//! 2. A cancelled task is never returned.
//! 3. The clock never moves backwards; an older `now` is ignored.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use navdrawer_runtime::scheduler::{Deferral, Scheduler, Task};
//!
//! #[derive(Debug, PartialEq)]
//! struct Ping;
//! impl Task for Ping {
//!     fn name(&self) -> &'static str { "ping" }
//! }
//!
//! let mut sched = Scheduler::new();
//! sched.schedule(Ping, Deferral::After(Duration::from_millis(10)));
//! assert!(sched.advance_to(Duration::from_millis(5)).is_empty());
//! assert_eq!(sched.advance_to(Duration::from_millis(10)), vec![Ping]);
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

/// A unit of deferred work.
pub trait Task {
    /// Stable name used in logs.
    fn name(&self) -> &'static str;
}

/// Handle returned by [`Scheduler::schedule`], used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    /// Raw sequence number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// When a task should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferral {
    /// On the next render frame.
    NextFrame,
    /// After the given delay from the current clock.
    After(Duration),
}

/// Deterministic deferred-task queue.
#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_seq: u64,
    timers: BTreeMap<(Duration, u64), T>,
    frame: Vec<(u64, T)>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    /// Create an empty scheduler at time zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            timers: BTreeMap::new(),
            frame: Vec::new(),
        }
    }

    /// Current clock value.
    #[inline]
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Number of queued tasks (timers and frame callbacks).
    #[must_use]
    pub fn pending(&self) -> usize {
        self.timers.len() + self.frame.len()
    }

    /// True when nothing is queued.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.timers.is_empty() && self.frame.is_empty()
    }

    /// Whether anything waits for the next frame.
    #[must_use]
    pub fn has_frame_work(&self) -> bool {
        !self.frame.is_empty()
    }

    /// Earliest timer deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Iterate queued timer tasks with their deadlines, earliest first.
    pub fn timers(&self) -> impl Iterator<Item = (Duration, &T)> + '_ {
        self.timers.iter().map(|((deadline, _), task)| (*deadline, task))
    }

    /// Whether a task with this id is still queued.
    #[must_use]
    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.timers.keys().any(|(_, seq)| *seq == id.0)
            || self.frame.iter().any(|(seq, _)| *seq == id.0)
    }
}

impl<T: Task> Scheduler<T> {
    /// Queue `task`.
    pub fn schedule(&mut self, task: T, when: Deferral) -> TaskId {
        let seq = self.next_seq;
        self.next_seq += 1;
        match when {
            Deferral::NextFrame => {
                tracing::debug!(
                    target: "navdrawer.scheduler",
                    task = task.name(),
                    id = seq,
                    "scheduled for next frame"
                );
                self.frame.push((seq, task));
            }
            Deferral::After(delay) => {
                let deadline = self.now.saturating_add(delay);
                tracing::debug!(
                    target: "navdrawer.scheduler",
                    task = task.name(),
                    id = seq,
                    delay_ms = delay.as_millis() as u64,
                    deadline_ms = deadline.as_millis() as u64,
                    "scheduled"
                );
                self.timers.insert((deadline, seq), task);
            }
        }
        TaskId(seq)
    }

    /// Cancel a queued task. Returns the task if it had not run yet.
    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        let key = self.timers.keys().find(|(_, seq)| *seq == id.0).copied();
        let task = match key {
            Some(key) => self.timers.remove(&key),
            None => {
                let index = self.frame.iter().position(|(seq, _)| *seq == id.0)?;
                Some(self.frame.remove(index).1)
            }
        };
        if let Some(task) = &task {
            tracing::debug!(
                target: "navdrawer.scheduler",
                task = task.name(),
                id = id.0,
                "cancelled"
            );
        }
        task
    }

    /// Move the clock to `now` and return every timer that became due.
    pub fn advance_to(&mut self, now: Duration) -> Vec<T> {
        if now > self.now {
            self.now = now;
        }
        let mut due = Vec::new();
        while let Some(entry) = self.timers.first_entry() {
            if entry.key().0 > self.now {
                break;
            }
            let ((_, seq), task) = entry.remove_entry();
            tracing::debug!(
                target: "navdrawer.scheduler",
                task = task.name(),
                id = seq,
                now_ms = self.now.as_millis() as u64,
                "due"
            );
            due.push(task);
        }
        due
    }

    /// Take every task queued for the current frame.
    pub fn take_frame(&mut self) -> Vec<T> {
        std::mem::take(&mut self.frame)
            .into_iter()
            .map(|(_, task)| task)
            .collect()
    }
}
