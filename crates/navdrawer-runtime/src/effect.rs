#![forbid(unsafe_code)]

//! Deferred-task observability.
//!
//! Every task the drawer runs out of the scheduler goes through
//! [`trace_task_effect`], which wraps it in a `drawer.task` span and emits
//! start/completion events on the `navdrawer.effect` target. Monotonic
//! counters track how many tasks ran and how many were skipped because the
//! drawer state moved on before they fired.

use std::sync::atomic::{AtomicU64, Ordering};
use web_time::Instant;

// ---------------------------------------------------------------------------
// Monotonic counters
// ---------------------------------------------------------------------------

static TASKS_EXECUTED_TOTAL: AtomicU64 = AtomicU64::new(0);
static TASKS_SKIPPED_TOTAL: AtomicU64 = AtomicU64::new(0);

/// Total deferred tasks executed (monotonic counter).
#[must_use]
pub fn tasks_executed_total() -> u64 {
    TASKS_EXECUTED_TOTAL.load(Ordering::Relaxed)
}

/// Total deferred tasks that fired but found their precondition stale.
#[must_use]
pub fn tasks_skipped_total() -> u64 {
    TASKS_SKIPPED_TOTAL.load(Ordering::Relaxed)
}

// ---------------------------------------------------------------------------
// Task instrumentation
// ---------------------------------------------------------------------------

/// Execute a deferred task with tracing instrumentation.
///
/// Wraps execution with a `drawer.task` span recording `task` and
/// `duration_us`.
pub fn trace_task_effect<F, R>(task: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    TASKS_EXECUTED_TOTAL.fetch_add(1, Ordering::Relaxed);

    let start = Instant::now();
    let span = tracing::debug_span!(
        "drawer.task",
        task = %task,
        duration_us = tracing::field::Empty,
    );
    let _guard = span.enter();

    tracing::debug!(target: "navdrawer.effect", task = %task, "task started");

    let result = f();
    let duration_us = start.elapsed().as_micros() as u64;
    span.record("duration_us", duration_us);

    tracing::debug!(
        target: "navdrawer.effect",
        task = %task,
        duration_us = duration_us,
        "task completed"
    );

    result
}

/// Record a task that fired after its precondition stopped holding.
pub fn record_task_skipped(task: &str, reason: &str) {
    TASKS_SKIPPED_TOTAL.fetch_add(1, Ordering::Relaxed);
    tracing::debug!(
        target: "navdrawer.effect",
        task = %task,
        reason = %reason,
        "task skipped"
    );
}
