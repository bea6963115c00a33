#![forbid(unsafe_code)]

/// What the host should do with the native event after the drawer saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EventOutcome {
    /// Suppress the browser's default action.
    pub prevent_default: bool,
    /// Keep the event from reaching handlers outside the drawer.
    pub stop_propagation: bool,
}

impl EventOutcome {
    /// Default action proceeds, propagation continues.
    pub const IGNORED: Self = Self {
        prevent_default: false,
        stop_propagation: false,
    };

    /// Default action suppressed.
    pub const PREVENT_DEFAULT: Self = Self {
        prevent_default: true,
        stop_propagation: false,
    };

    /// Mark the event as stopped at the drawer boundary.
    #[must_use]
    pub const fn stopped(mut self) -> Self {
        self.stop_propagation = true;
        self
    }

    /// Combine two outcomes; each flag is set if either side set it.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        Self {
            prevent_default: self.prevent_default || other.prevent_default,
            stop_propagation: self.stop_propagation || other.stop_propagation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_is_flagwise_or() {
        let out = EventOutcome::PREVENT_DEFAULT.merge(EventOutcome::IGNORED.stopped());
        assert!(out.prevent_default);
        assert!(out.stop_propagation);
        assert_eq!(EventOutcome::default(), EventOutcome::IGNORED);
    }
}
