#![forbid(unsafe_code)]

//! Routing of dismissal input.
//!
//! Exactly four inputs close the drawer:
//!
//! 1. Activation of the close control.
//! 2. Pointer-down whose direct target is the backdrop itself.
//! 3. Escape while open.
//! 4. A viewport resize while open, debounced: every resize cancels the
//!    pending close and schedules a new one.
//!
//! Anything else, including clicks elsewhere on the page, leaves the drawer
//! alone.

use std::time::Duration;

use navdrawer_core::{Document, KeyCode, KeyEvent, PointerButton};
use navdrawer_runtime::{Deferral, Scheduler, TaskId};

use crate::disclosure::{DrawerElements, DrawerState, TransitionCause};
use crate::task::DrawerTask;

/// Decides which inputs dismiss the drawer and owns the resize debounce.
#[derive(Debug, Clone, Default)]
pub struct DismissalRouter {
    resize_debounce: Duration,
    pending_resize: Option<TaskId>,
}

impl DismissalRouter {
    /// Router with the given resize quiet period.
    #[must_use]
    pub const fn new(resize_debounce: Duration) -> Self {
        Self {
            resize_debounce,
            pending_resize: None,
        }
    }

    /// Handle of the queued resize close, if any.
    #[must_use]
    pub const fn pending_resize(&self) -> Option<TaskId> {
        self.pending_resize
    }

    /// Close cause for a pointer-down, if it dismisses.
    pub fn on_pointer_down<N: PartialEq>(
        &self,
        state: DrawerState,
        elements: &DrawerElements<N>,
        target: &N,
    ) -> Option<TransitionCause> {
        let on_backdrop = elements.backdrop.as_ref() == Some(target);
        (state.is_open() && on_backdrop).then(|| {
            tracing::debug!(target: "navdrawer.dismissal", "backdrop pointer-down");
            TransitionCause::Backdrop
        })
    }

    /// Close cause for an activation, if it hits the close control.
    pub fn on_activation<D: Document>(
        &self,
        doc: &D,
        elements: &DrawerElements<D::Node>,
        target: &D::Node,
        button: PointerButton,
    ) -> Option<TransitionCause> {
        let close = elements.close.as_ref()?;
        (button == PointerButton::Primary && doc.contains(close, target)).then(|| {
            tracing::debug!(target: "navdrawer.dismissal", "close control activated");
            TransitionCause::CloseControl
        })
    }

    /// Close cause for a key press, if it dismisses.
    pub fn on_key(&self, state: DrawerState, key: &KeyEvent) -> Option<TransitionCause> {
        (state.is_open() && key.code == KeyCode::Escape && key.is_press()).then(|| {
            tracing::debug!(target: "navdrawer.dismissal", "escape pressed");
            TransitionCause::Escape
        })
    }

    /// Restart the resize debounce. Nothing is queued while closed.
    pub fn on_resize(&mut self, state: DrawerState, scheduler: &mut Scheduler<DrawerTask>) {
        if let Some(id) = self.pending_resize.take() {
            scheduler.cancel(id);
        }
        if state.is_open() {
            let id = scheduler.schedule(DrawerTask::ResizeClose, Deferral::After(self.resize_debounce));
            self.pending_resize = Some(id);
        }
    }

    /// The debounced close fired. Returns the cause if the drawer should
    /// still close.
    pub fn on_resize_settled(&mut self, state: DrawerState) -> Option<TransitionCause> {
        self.pending_resize = None;
        state.is_open().then_some(TransitionCause::Resize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navdrawer_core::{KeyEventKind, Modifiers};
    use navdrawer_harness::{ElementSpec, NodeId, standard_page};
    use navdrawer_runtime::DrawerConfig;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn elements(doc: &navdrawer_harness::MockDocument) -> DrawerElements<NodeId> {
        DrawerElements::resolve(doc, &DrawerConfig::default())
    }

    #[test]
    fn only_exact_backdrop_pointer_down_dismisses() {
        let mut doc = standard_page();
        let backdrop = doc.id("backdrop");
        let child = doc.append(backdrop, ElementSpec::new("span"));
        let els = elements(&doc);
        let router = DismissalRouter::new(ms(120));

        assert_eq!(
            router.on_pointer_down(DrawerState::Open, &els, &backdrop),
            Some(TransitionCause::Backdrop)
        );
        assert_eq!(router.on_pointer_down(DrawerState::Open, &els, &child), None);
        assert_eq!(router.on_pointer_down(DrawerState::Closed, &els, &backdrop), None);
        let inside = doc.id("link-pricing");
        assert_eq!(router.on_pointer_down(DrawerState::Open, &els, &inside), None);
        let main = doc.id("pricing");
        assert_eq!(router.on_pointer_down(DrawerState::Open, &els, &main), None);
    }

    #[test]
    fn close_control_activation_includes_descendants() {
        let mut doc = standard_page();
        let close = doc.id("closeMenu");
        let icon = doc.append(close, ElementSpec::new("svg"));
        let els = elements(&doc);
        let router = DismissalRouter::new(ms(120));
        assert_eq!(
            router.on_activation(&doc, &els, &icon, PointerButton::Primary),
            Some(TransitionCause::CloseControl)
        );
        assert_eq!(router.on_activation(&doc, &els, &icon, PointerButton::Auxiliary), None);
        assert_eq!(
            router.on_activation(&doc, &els, &doc.id("link-about"), PointerButton::Primary),
            None
        );
    }

    #[test]
    fn escape_only_while_open_and_on_press() {
        let router = DismissalRouter::new(ms(120));
        let esc = KeyEvent::new(KeyCode::Escape);
        assert_eq!(router.on_key(DrawerState::Open, &esc), Some(TransitionCause::Escape));
        assert_eq!(router.on_key(DrawerState::Closed, &esc), None);
        let release = esc.with_kind(KeyEventKind::Release);
        assert_eq!(router.on_key(DrawerState::Open, &release), None);
        let shifted = esc.with_modifiers(Modifiers::SHIFT);
        assert_eq!(router.on_key(DrawerState::Open, &shifted), Some(TransitionCause::Escape));
        let tab = KeyEvent::new(KeyCode::Tab);
        assert_eq!(router.on_key(DrawerState::Open, &tab), None);
    }

    #[test]
    fn resize_while_closed_queues_nothing() {
        let mut sched = Scheduler::new();
        let mut router = DismissalRouter::new(ms(120));
        router.on_resize(DrawerState::Closed, &mut sched);
        assert!(sched.is_idle());
        assert_eq!(router.pending_resize(), None);
    }

    #[test]
    fn resize_burst_keeps_one_pending_close() {
        let mut sched = Scheduler::new();
        let mut router = DismissalRouter::new(ms(120));
        router.on_resize(DrawerState::Open, &mut sched);
        sched.advance_to(ms(50));
        router.on_resize(DrawerState::Open, &mut sched);
        sched.advance_to(ms(100));
        router.on_resize(DrawerState::Open, &mut sched);

        assert_eq!(sched.pending(), 1);
        assert_eq!(sched.next_deadline(), Some(ms(220)));
        assert!(sched.advance_to(ms(219)).is_empty());
        assert_eq!(sched.advance_to(ms(220)), vec![DrawerTask::ResizeClose]);
        assert_eq!(
            router.on_resize_settled(DrawerState::Open),
            Some(TransitionCause::Resize)
        );
        assert_eq!(router.pending_resize(), None);
    }

    #[test]
    fn settled_resize_after_close_is_dropped() {
        let mut router = DismissalRouter::new(ms(120));
        assert_eq!(router.on_resize_settled(DrawerState::Closed), None);
    }
}
