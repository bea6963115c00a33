#![forbid(unsafe_code)]

//! Deterministic runtime pieces for navdrawer.
//!
//! - [`scheduler`]: one queue for every deferred task, driven by a host clock.
//! - [`config`]: element ids, classes, and delays as data.
//! - [`effect`]: tracing spans and counters around deferred task execution.

pub mod config;
pub mod effect;
pub mod scheduler;

pub use config::{ConfigError, DelayConfig, DrawerConfig};
pub use effect::{record_task_skipped, trace_task_effect};
pub use scheduler::{Deferral, Scheduler, Task, TaskId};
