#![forbid(unsafe_code)]

//! Tab containment while the drawer is open.
//!
//! # Invariants
//!
//! 1. The trap only acts on Tab presses while active.
//! 2. Focus wraps last -> first on Tab and first -> last on Shift+Tab.
//! 3. Focus outside the container is pulled back in (first on Tab, last on
//!    Shift+Tab).
//!
//! # Failure Modes
//!
//! An empty focusable sequence lets the key through untouched.

use navdrawer_core::{Document, KeyCode, KeyEvent};

use super::focusable::compute_focusable;

/// Result of offering a key to the trap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabOutcome {
    /// Not a trapped Tab press; the trap did nothing.
    Ignored,
    /// Tab inside the sequence; the native move proceeds.
    Passed,
    /// Focus was moved by the trap; the native move must be suppressed.
    Wrapped,
}

impl TabOutcome {
    /// Whether the native key action must be suppressed.
    #[must_use]
    pub const fn prevents_default(self) -> bool {
        matches!(self, Self::Wrapped)
    }
}

/// Keeps sequential focus inside a container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusTrap {
    active: bool,
}

impl FocusTrap {
    /// Inactive trap.
    #[must_use]
    pub const fn new() -> Self {
        Self { active: false }
    }

    /// Start containing focus.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Stop containing focus.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Whether the trap is active.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Handle a key press against `container`.
    pub fn handle_tab_key<D: Document>(
        &self,
        doc: &mut D,
        container: Option<&D::Node>,
        key: &KeyEvent,
    ) -> TabOutcome {
        if !self.active || key.code != KeyCode::Tab || !key.is_press() {
            return TabOutcome::Ignored;
        }
        let focusable = compute_focusable(&*doc, container);
        let (Some(first), Some(last)) = (focusable.first(), focusable.last()) else {
            return TabOutcome::Ignored;
        };

        let current = doc.active_element();
        let inside = match (&current, container) {
            (Some(node), Some(container)) => doc.contains(container, node),
            _ => false,
        };
        let backwards = key.shift();

        let target = if !inside {
            if backwards { last } else { first }
        } else if backwards && current.as_ref() == Some(first) {
            last
        } else if !backwards && current.as_ref() == Some(last) {
            first
        } else {
            return TabOutcome::Passed;
        };

        tracing::debug!(
            target: "navdrawer.focus",
            backwards,
            from_outside = !inside,
            sequence_len = focusable.len(),
            "tab wrapped"
        );
        let target = target.clone();
        doc.focus(&target);
        TabOutcome::Wrapped
    }
}
