#![forbid(unsafe_code)]

//! Bookkeeping for the binding's single `setTimeout`.
//!
//! The browser side keeps one persistent callback and re-registers it
//! whenever the scheduler's earliest deadline moves. [`TimerSlot`] decides
//! what each re-arm has to do so that an unchanged deadline costs nothing.
//!
//! # Invariants
//!
//! - At most one handle is armed at a time.
//! - A handle is cancelled exactly once: either by [`TimerSlot::plan`]
//!   returning it or by [`TimerSlot::take`].

use std::time::Duration;

/// What the host must do to bring its timer in line with the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPlan {
    /// The armed timer already fires at the right deadline.
    Keep,
    /// Nothing is due; cancel the handle if one is armed.
    Idle {
        /// Handle to `clearTimeout`.
        cancel: Option<i32>,
    },
    /// Register the callback for the new deadline.
    Arm {
        /// Handle to `clearTimeout` first.
        cancel: Option<i32>,
    },
}

/// The armed `setTimeout` handle and the deadline it was armed for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerSlot {
    armed: Option<(i32, Duration)>,
}

impl TimerSlot {
    /// Empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { armed: None }
    }

    /// Armed handle, if any.
    #[must_use]
    pub fn handle(&self) -> Option<i32> {
        self.armed.map(|(handle, _)| handle)
    }

    /// Plan the re-arm for the scheduler's next `deadline`. Any handle the
    /// plan cancels is forgotten by the slot.
    #[must_use]
    pub fn plan(&mut self, deadline: Option<Duration>) -> TimerPlan {
        match (self.armed, deadline) {
            (Some((_, armed)), Some(next)) if armed == next => TimerPlan::Keep,
            (_, None) => TimerPlan::Idle {
                cancel: self.take(),
            },
            (_, Some(_)) => TimerPlan::Arm {
                cancel: self.take(),
            },
        }
    }

    /// Record a handle the host just registered.
    pub fn armed(&mut self, handle: i32, deadline: Duration) {
        self.armed = Some((handle, deadline));
    }

    /// The armed timer fired; its handle is spent.
    pub fn fired(&mut self) {
        self.armed = None;
    }

    /// Forget and return the armed handle.
    pub fn take(&mut self) -> Option<i32> {
        self.armed.take().map(|(handle, _)| handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn unchanged_deadline_keeps_the_armed_timer() {
        let mut slot = TimerSlot::new();
        assert_eq!(slot.plan(Some(ms(200))), TimerPlan::Arm { cancel: None });
        slot.armed(7, ms(200));

        for _ in 0..50 {
            assert_eq!(slot.plan(Some(ms(200))), TimerPlan::Keep);
        }
        assert_eq!(slot.handle(), Some(7));
    }

    #[test]
    fn moved_deadline_cancels_before_arming() {
        let mut slot = TimerSlot::new();
        slot.armed(7, ms(200));

        assert_eq!(slot.plan(Some(ms(120))), TimerPlan::Arm { cancel: Some(7) });
        assert_eq!(slot.handle(), None);
        slot.armed(8, ms(120));
        assert_eq!(slot.plan(None), TimerPlan::Idle { cancel: Some(8) });
        assert_eq!(slot.plan(None), TimerPlan::Idle { cancel: None });
    }

    #[test]
    fn fired_handle_is_never_cancelled() {
        let mut slot = TimerSlot::new();
        slot.armed(3, ms(50));
        slot.fired();

        assert_eq!(slot.plan(Some(ms(50))), TimerPlan::Arm { cancel: None });
        assert_eq!(slot.take(), None);
    }
}
