#![forbid(unsafe_code)]

//! The composed navigation drawer.
//!
//! [`Drawer`] owns a host [`Document`], the configuration, every component,
//! and the task scheduler. Hosts feed it events through
//! [`Drawer::handle_event`], report frames through [`Drawer::run_frame`], and
//! report time through [`Drawer::tick`].
//!
//! # Click routing
//!
//! Activations are routed in this order; the first match wins:
//!
//! 1. Toggle control (or anything inside it): toggle.
//! 2. Close control: close.
//! 3. Inside the drawer: link classification. Propagation always stops at
//!    the drawer boundary.
//! 4. Outside the drawer: plain `#id` anchors whose element exists scroll in
//!    place without touching the drawer.
//!
//! A click on the backdrop does nothing by itself; only a pointer-down
//! directly on it dismisses.

use std::time::Duration;

use navdrawer_core::{Document, Event, KeyCode, KeyEvent, PointerButton, PointerEvent};
use navdrawer_runtime::{Deferral, DrawerConfig, Scheduler, Task, record_task_skipped, trace_task_effect};

use crate::disclosure::{DisclosureController, DrawerElements, DrawerState, DrawerTransition, TransitionCause};
use crate::dismissal::DismissalRouter;
use crate::nav_link::{NavLinkClassifier, enclosing_link, outside_fragment};
use crate::outcome::EventOutcome;
use crate::scroll::ScrollCoordinator;
use crate::task::DrawerTask;

/// A navigation drawer bound to one document.
#[derive(Debug)]
pub struct Drawer<D: Document> {
    doc: D,
    config: DrawerConfig,
    disclosure: DisclosureController<D::Node, D::WeakNode>,
    dismissal: DismissalRouter,
    links: NavLinkClassifier,
    scroll: ScrollCoordinator,
    scheduler: Scheduler<DrawerTask>,
}

impl<D: Document> Drawer<D> {
    /// Bind a closed drawer to `doc`, resolving elements by the ids in
    /// `config`.
    pub fn new(doc: D, config: DrawerConfig) -> Self {
        let elements = DrawerElements::resolve(&doc, &config);
        Self::with_elements(doc, config, elements)
    }

    /// Bind a closed drawer to explicitly provided element handles.
    pub fn with_elements(doc: D, config: DrawerConfig, elements: DrawerElements<D::Node>) -> Self {
        Self {
            disclosure: DisclosureController::new(elements, &config),
            dismissal: DismissalRouter::new(config.delays.resize_debounce()),
            links: NavLinkClassifier::from_delays(&config.delays),
            scroll: ScrollCoordinator::from_config(&config),
            scheduler: Scheduler::new(),
            config,
            doc,
        }
    }

    // --- Accessors ---

    /// Current state.
    #[must_use]
    pub fn state(&self) -> DrawerState {
        self.disclosure.state()
    }

    /// Whether the drawer is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.disclosure.is_open()
    }

    /// The bound document.
    #[must_use]
    pub const fn document(&self) -> &D {
        &self.doc
    }

    /// Mutable access to the bound document.
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &DrawerConfig {
        &self.config
    }

    /// Element handles in use.
    #[must_use]
    pub fn elements(&self) -> &DrawerElements<D::Node> {
        self.disclosure.elements()
    }

    /// The scheduler, for inspection.
    #[must_use]
    pub const fn scheduler(&self) -> &Scheduler<DrawerTask> {
        &self.scheduler
    }

    /// The scroll coordinator.
    #[must_use]
    pub const fn scroll(&self) -> &ScrollCoordinator {
        &self.scroll
    }

    /// Most recent transition.
    #[must_use]
    pub fn last_transition(&self) -> Option<&DrawerTransition> {
        self.disclosure.last_transition()
    }

    /// Take the most recent transition, clearing it.
    pub fn take_transition(&mut self) -> Option<DrawerTransition> {
        self.disclosure.take_transition()
    }

    /// Earliest pending timer deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    /// Whether a frame callback is pending.
    #[must_use]
    pub fn has_frame_work(&self) -> bool {
        self.scheduler.has_frame_work()
    }

    /// Release the document.
    pub fn into_document(self) -> D {
        self.doc
    }

    // --- Programmatic control ---

    /// Open the drawer.
    pub fn open(&mut self) -> bool {
        self.disclosure
            .open(&mut self.doc, &mut self.scheduler, TransitionCause::Programmatic)
    }

    /// Close the drawer.
    pub fn close(&mut self) -> bool {
        self.disclosure
            .close(&mut self.doc, &mut self.scheduler, TransitionCause::Programmatic)
    }

    /// Toggle the drawer.
    pub fn toggle(&mut self) -> bool {
        self.disclosure
            .toggle(&mut self.doc, &mut self.scheduler, TransitionCause::Programmatic)
    }

    // --- Event handling ---

    /// Dispatch one host event.
    pub fn handle_event(&mut self, event: &Event<D::Node>) -> EventOutcome {
        tracing::trace!(target: "navdrawer.dismissal", kind = event.kind_name(), "event");
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::PointerDown(pointer) => self.handle_pointer_down(pointer),
            Event::Click(pointer) => self.handle_click(pointer),
            Event::Resize { .. } => {
                self.dismissal.on_resize(self.disclosure.state(), &mut self.scheduler);
                EventOutcome::IGNORED
            }
            Event::HashChange | Event::Load => {
                if let Some(fragment) = self.doc.location_fragment() {
                    self.scheduler.schedule(
                        DrawerTask::SettleScroll(fragment),
                        Deferral::After(self.config.delays.settle()),
                    );
                }
                EventOutcome::IGNORED
            }
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> EventOutcome {
        if let Some(cause) = self.dismissal.on_key(self.disclosure.state(), key) {
            self.close_for(cause);
            return EventOutcome::IGNORED;
        }
        if key.code == KeyCode::Tab {
            let container = self.disclosure.elements().drawer.clone();
            let outcome = self
                .disclosure
                .trap()
                .handle_tab_key(&mut self.doc, container.as_ref(), key);
            if outcome.prevents_default() {
                return EventOutcome::PREVENT_DEFAULT;
            }
        }
        EventOutcome::IGNORED
    }

    fn handle_pointer_down(&mut self, pointer: &PointerEvent<D::Node>) -> EventOutcome {
        let state = self.disclosure.state();
        if let Some(cause) =
            self.dismissal
                .on_pointer_down(state, self.disclosure.elements(), &pointer.target)
        {
            self.close_for(cause);
            return EventOutcome::IGNORED;
        }
        if self.disclosure.elements().in_drawer(&self.doc, &pointer.target) {
            return EventOutcome::IGNORED.stopped();
        }
        EventOutcome::IGNORED
    }

    fn handle_click(&mut self, pointer: &PointerEvent<D::Node>) -> EventOutcome {
        let target = &pointer.target;
        let elements = self.disclosure.elements();

        let on_toggle = elements
            .toggle
            .as_ref()
            .is_some_and(|toggle| self.doc.contains(toggle, target));
        if on_toggle {
            if pointer.button == PointerButton::Primary {
                self.disclosure
                    .toggle(&mut self.doc, &mut self.scheduler, TransitionCause::Toggle);
            }
            return EventOutcome::IGNORED;
        }

        if let Some(cause) =
            self.dismissal
                .on_activation(&self.doc, elements, target, pointer.button)
        {
            self.close_for(cause);
            return EventOutcome::IGNORED.stopped();
        }

        if elements.in_drawer(&self.doc, target) {
            let Some(anchor) = enclosing_link(&self.doc, target) else {
                return EventOutcome::IGNORED.stopped();
            };
            let action = self.links.classify(&self.doc, &anchor, pointer);
            let Some((task, when)) = self.links.follow_up(action) else {
                return EventOutcome::IGNORED.stopped();
            };
            self.close_for(TransitionCause::Link);
            self.scheduler.schedule(task, when);
            return EventOutcome::PREVENT_DEFAULT.stopped();
        }

        if let Some(anchor) = enclosing_link(&self.doc, target)
            && let Some(fragment) = outside_fragment(&self.doc, &anchor, pointer)
        {
            self.scroll.scroll_to_fragment(&mut self.doc, &fragment);
            return EventOutcome::PREVENT_DEFAULT;
        }
        EventOutcome::IGNORED
    }

    fn close_for(&mut self, cause: TransitionCause) -> bool {
        self.disclosure.close(&mut self.doc, &mut self.scheduler, cause)
    }

    // --- Time ---

    /// Run every task queued for this render frame.
    pub fn run_frame(&mut self) {
        for task in self.scheduler.take_frame() {
            self.run_task(task);
        }
    }

    /// Advance the clock to `now` (host monotonic time) and run due tasks.
    pub fn tick(&mut self, now: Duration) {
        for task in self.scheduler.advance_to(now) {
            self.run_task(task);
        }
    }

    fn run_task(&mut self, task: DrawerTask) {
        let name = task.name();
        trace_task_effect(name, || match task {
            DrawerTask::ShowBackdrop => self.disclosure.show_backdrop(&mut self.doc),
            DrawerTask::HideBackdrop => self.disclosure.hide_backdrop(&mut self.doc),
            DrawerTask::ResizeClose => {
                match self.dismissal.on_resize_settled(self.disclosure.state()) {
                    Some(cause) => {
                        self.disclosure.close(&mut self.doc, &mut self.scheduler, cause);
                    }
                    None => record_task_skipped(name, "drawer already closed"),
                }
            }
            DrawerTask::ScrollToFragment(fragment) => {
                if !self.scroll.scroll_to_fragment(&mut self.doc, &fragment) {
                    tracing::debug!(
                        target: "navdrawer.scroll",
                        fragment = %fragment,
                        "target missing, setting location fragment"
                    );
                    self.doc.set_location_hash(&fragment);
                }
            }
            DrawerTask::Navigate(url) => {
                tracing::info!(target: "navdrawer.nav_link", url = %url, "navigating");
                self.doc.navigate(&url);
            }
            DrawerTask::SettleScroll(fragment) => {
                if !self.scroll.scroll_to_fragment(&mut self.doc, &fragment) {
                    record_task_skipped(name, "fragment target not found");
                }
            }
        });
    }
}
