#![forbid(unsafe_code)]

//! Drawer open/closed state and every side effect tied to it.
//!
//! [`DisclosureController`] is the only writer of [`DrawerState`] and of the
//! focus snapshot. Opening and closing apply their DOM effects synchronously;
//! only the backdrop fade is deferred through the scheduler.
//!
//! # Invariants
//!
//! 1. The focus trap is active iff the state is `Open`.
//! 2. The body scroll lock is applied iff the state is `Open`, and closing
//!    restores the exact inline value that was present before opening.
//! 3. Open -> Open and Closed -> Closed are no-ops with no side effects.
//! 4. The backdrop is present from the moment the drawer opens; after a
//!    close it stays present (without the shown class) for the grace period,
//!    then is hidden only if the drawer is still closed.
//!
//! # Failure Modes
//!
//! - Without a drawer element, `open` does nothing.
//! - Missing toggle, close control, or backdrop: the matching effects are
//!   skipped.
//! - If the focus snapshot was removed or can no longer take focus, focus
//!   goes to the toggle control instead.

use std::fmt;

use navdrawer_core::Document;
use navdrawer_runtime::{Deferral, DrawerConfig, Scheduler, record_task_skipped};

use crate::focus::{FocusTrap, compute_focusable, is_restorable};
use crate::task::DrawerTask;

/// Whether the drawer is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DrawerState {
    /// Hidden (initial state).
    #[default]
    Closed,
    /// Showing, with focus trapped inside.
    Open,
}

impl DrawerState {
    /// `true` for [`DrawerState::Open`].
    #[inline]
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open => "open",
        }
    }
}

impl fmt::Display for DrawerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What caused a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionCause {
    /// The toggle control was activated.
    Toggle,
    /// The dedicated close control was activated.
    CloseControl,
    /// Pointer-down directly on the backdrop.
    Backdrop,
    /// Escape while open.
    Escape,
    /// The viewport stopped resizing.
    Resize,
    /// A drawer link was followed.
    Link,
    /// Host code called `open`/`close`/`toggle` directly.
    Programmatic,
}

impl TransitionCause {
    /// Stable label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Toggle => "toggle",
            Self::CloseControl => "close_control",
            Self::Backdrop => "backdrop",
            Self::Escape => "escape",
            Self::Resize => "resize",
            Self::Link => "link",
            Self::Programmatic => "programmatic",
        }
    }
}

/// A recorded state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawerTransition {
    /// State before.
    pub from: DrawerState,
    /// State after.
    pub to: DrawerState,
    /// What triggered it.
    pub cause: TransitionCause,
}

/// Handles to the elements the drawer drives. Any of them may be absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawerElements<N> {
    /// Control that toggles the drawer.
    pub toggle: Option<N>,
    /// The drawer container.
    pub drawer: Option<N>,
    /// Close control inside the drawer.
    pub close: Option<N>,
    /// Overlay behind the drawer.
    pub backdrop: Option<N>,
}

impl<N> Default for DrawerElements<N> {
    fn default() -> Self {
        Self {
            toggle: None,
            drawer: None,
            close: None,
            backdrop: None,
        }
    }
}

impl<N: Clone + PartialEq + fmt::Debug> DrawerElements<N> {
    /// Look the elements up by the ids in `config`.
    pub fn resolve<D: Document<Node = N>>(doc: &D, config: &DrawerConfig) -> Self {
        let elements = Self {
            toggle: doc.element_by_id(&config.toggle_id),
            drawer: doc.element_by_id(&config.drawer_id),
            close: doc.element_by_id(&config.close_id),
            backdrop: doc.element_by_id(&config.backdrop_id),
        };
        tracing::debug!(
            target: "navdrawer.disclosure",
            toggle = elements.toggle.is_some(),
            drawer = elements.drawer.is_some(),
            close = elements.close.is_some(),
            backdrop = elements.backdrop.is_some(),
            "resolved drawer elements"
        );
        elements
    }

    /// Whether `node` is the drawer or inside it.
    pub fn in_drawer<D: Document<Node = N>>(&self, doc: &D, node: &N) -> bool {
        self.drawer.as_ref().is_some_and(|d| doc.contains(d, node))
    }
}

/// Owner of [`DrawerState`] and the focus snapshot.
///
/// `W` is the host's weak node handle ([`Document::WeakNode`]); the snapshot
/// never keeps the previously focused element alive.
#[derive(Debug, Clone)]
pub struct DisclosureController<N, W = N> {
    state: DrawerState,
    snapshot: Option<W>,
    elements: DrawerElements<N>,
    trap: FocusTrap,
    saved_overflow: Option<String>,
    last_transition: Option<DrawerTransition>,
    shown_class: String,
    open_class: String,
    backdrop_grace: std::time::Duration,
}

impl<N: Clone + PartialEq + fmt::Debug, W: Clone + fmt::Debug> DisclosureController<N, W> {
    /// Closed controller driving `elements`.
    #[must_use]
    pub fn new(elements: DrawerElements<N>, config: &DrawerConfig) -> Self {
        Self {
            state: DrawerState::Closed,
            snapshot: None,
            elements,
            trap: FocusTrap::new(),
            saved_overflow: None,
            last_transition: None,
            shown_class: config.shown_class.clone(),
            open_class: config.open_class.clone(),
            backdrop_grace: config.delays.backdrop_grace(),
        }
    }

    /// Current state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> DrawerState {
        self.state
    }

    /// Whether the drawer is open.
    #[inline]
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Element handles in use.
    #[must_use]
    pub const fn elements(&self) -> &DrawerElements<N> {
        &self.elements
    }

    /// The focus trap (active iff open).
    #[must_use]
    pub const fn trap(&self) -> &FocusTrap {
        &self.trap
    }

    /// Weak handle to the element focused right before the last open.
    #[must_use]
    pub const fn focus_snapshot(&self) -> Option<&W> {
        self.snapshot.as_ref()
    }

    /// Most recent transition.
    #[must_use]
    pub const fn last_transition(&self) -> Option<&DrawerTransition> {
        self.last_transition.as_ref()
    }

    /// Take the most recent transition, clearing it.
    pub fn take_transition(&mut self) -> Option<DrawerTransition> {
        self.last_transition.take()
    }

    /// Open the drawer. Returns `true` if the state changed.
    pub fn open<D: Document<Node = N, WeakNode = W>>(
        &mut self,
        doc: &mut D,
        scheduler: &mut Scheduler<DrawerTask>,
        cause: TransitionCause,
    ) -> bool {
        if self.state.is_open() {
            return false;
        }
        let Some(drawer) = self.elements.drawer.clone() else {
            tracing::debug!(target: "navdrawer.disclosure", "open skipped: no drawer element");
            return false;
        };

        self.snapshot = doc.active_element().map(|node| doc.downgrade(&node));
        self.state = DrawerState::Open;

        doc.set_class(&drawer, &self.open_class, true);
        if let Some(backdrop) = &self.elements.backdrop {
            doc.set_hidden(backdrop, false);
            scheduler.schedule(DrawerTask::ShowBackdrop, Deferral::NextFrame);
        }
        if let Some(toggle) = &self.elements.toggle {
            doc.set_attribute(toggle, "aria-expanded", "true");
        }
        doc.set_attribute(&drawer, "aria-hidden", "false");

        self.saved_overflow = Some(doc.body_overflow());
        doc.set_body_overflow("hidden");

        if let Some(first) = compute_focusable(&*doc, Some(&drawer)).first() {
            doc.focus(first);
        }
        self.trap.activate();

        self.record(DrawerState::Closed, DrawerState::Open, cause);
        true
    }

    /// Close the drawer. Returns `true` if the state changed.
    pub fn close<D: Document<Node = N, WeakNode = W>>(
        &mut self,
        doc: &mut D,
        scheduler: &mut Scheduler<DrawerTask>,
        cause: TransitionCause,
    ) -> bool {
        if !self.state.is_open() {
            return false;
        }
        self.state = DrawerState::Closed;

        if let Some(drawer) = &self.elements.drawer {
            doc.set_class(drawer, &self.open_class, false);
            doc.set_attribute(drawer, "aria-hidden", "true");
        }
        if let Some(backdrop) = &self.elements.backdrop {
            doc.set_class(backdrop, &self.shown_class, false);
            scheduler.schedule(DrawerTask::HideBackdrop, Deferral::After(self.backdrop_grace));
        }
        if let Some(toggle) = &self.elements.toggle {
            doc.set_attribute(toggle, "aria-expanded", "false");
        }

        let overflow = self.saved_overflow.take().unwrap_or_default();
        doc.set_body_overflow(&overflow);

        self.trap.deactivate();
        self.restore_focus(doc);

        self.record(DrawerState::Open, DrawerState::Closed, cause);
        true
    }

    /// Close if open, open otherwise.
    pub fn toggle<D: Document<Node = N, WeakNode = W>>(
        &mut self,
        doc: &mut D,
        scheduler: &mut Scheduler<DrawerTask>,
        cause: TransitionCause,
    ) -> bool {
        if self.state.is_open() {
            self.close(doc, scheduler, cause)
        } else {
            self.open(doc, scheduler, cause)
        }
    }

    /// Frame callback: mark the backdrop shown if the drawer is still open.
    pub fn show_backdrop<D: Document<Node = N>>(&self, doc: &mut D) {
        if !self.state.is_open() {
            record_task_skipped("show_backdrop", "drawer closed before frame");
            return;
        }
        if let Some(backdrop) = &self.elements.backdrop {
            doc.set_class(backdrop, &self.shown_class, true);
        }
    }

    /// Grace timer: hide the backdrop if the drawer is still closed.
    pub fn hide_backdrop<D: Document<Node = N>>(&self, doc: &mut D) {
        if self.state.is_open() {
            record_task_skipped("hide_backdrop", "drawer reopened during grace period");
            return;
        }
        if let Some(backdrop) = &self.elements.backdrop {
            doc.set_hidden(backdrop, true);
        }
    }

    fn restore_focus<D: Document<Node = N, WeakNode = W>>(&mut self, doc: &mut D) {
        let snapshot = self
            .snapshot
            .take()
            .and_then(|weak| doc.upgrade(&weak))
            .filter(|node| is_restorable(&*doc, node));
        match snapshot.or_else(|| self.elements.toggle.clone()) {
            Some(target) => doc.focus(&target),
            None => tracing::debug!(
                target: "navdrawer.focus",
                "no focus restore target"
            ),
        }
    }

    fn record(&mut self, from: DrawerState, to: DrawerState, cause: TransitionCause) {
        tracing::info!(
            target: "navdrawer.disclosure",
            from = %from,
            to = %to,
            cause = cause.as_str(),
            "drawer transition"
        );
        self.last_transition = Some(DrawerTransition { from, to, cause });
    }
}
