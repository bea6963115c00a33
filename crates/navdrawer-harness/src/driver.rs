#![forbid(unsafe_code)]

//! Scenario driver for end-to-end drawer tests.
//!
//! [`DrawerHarness`] wraps a [`Drawer`] over a [`MockDocument`] and a
//! deterministic clock. Time only moves through [`DrawerHarness::advance`],
//! which renders one frame first (like a browser would before timers fire in
//! the same slice) and then runs every timer that became due.

use std::time::Duration;

use navdrawer_core::{Event, KeyCode, KeyEvent, Modifiers, PointerButton, PointerEvent};
use navdrawer_runtime::DrawerConfig;
use navdrawer_widgets::{Drawer, DrawerState, EventOutcome};

use crate::mock::{MockDocument, NodeId};
use crate::page::standard_page;

/// Deterministic driver around a mock-backed drawer.
#[derive(Debug)]
pub struct DrawerHarness {
    drawer: Drawer<MockDocument>,
    now: Duration,
}

impl Default for DrawerHarness {
    fn default() -> Self {
        Self::new(standard_page())
    }
}

impl DrawerHarness {
    /// Drawer with the default configuration over `doc`.
    #[must_use]
    pub fn new(doc: MockDocument) -> Self {
        Self::with_config(doc, DrawerConfig::default())
    }

    /// Drawer with `config` over `doc`.
    #[must_use]
    pub fn with_config(doc: MockDocument, config: DrawerConfig) -> Self {
        Self {
            drawer: Drawer::new(doc, config),
            now: Duration::ZERO,
        }
    }

    /// The drawer under test.
    #[must_use]
    pub const fn drawer(&self) -> &Drawer<MockDocument> {
        &self.drawer
    }

    /// Mutable access to the drawer under test.
    pub fn drawer_mut(&mut self) -> &mut Drawer<MockDocument> {
        &mut self.drawer
    }

    /// The mock document.
    #[must_use]
    pub const fn doc(&self) -> &MockDocument {
        self.drawer.document()
    }

    /// Mutable access to the mock document.
    pub fn doc_mut(&mut self) -> &mut MockDocument {
        self.drawer.document_mut()
    }

    /// Element by id; panics if absent.
    #[must_use]
    pub fn node(&self, id: &str) -> NodeId {
        self.doc().id(id)
    }

    /// Current drawer state.
    #[must_use]
    pub fn state(&self) -> DrawerState {
        self.drawer.state()
    }

    /// Whether the drawer is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.drawer.is_open()
    }

    /// Elapsed harness time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Render a frame, then move the clock forward by `ms` milliseconds.
    pub fn advance(&mut self, ms: u64) {
        self.drawer.run_frame();
        self.now += Duration::from_millis(ms);
        self.drawer.tick(self.now);
    }

    /// Render pending frames only.
    pub fn frame(&mut self) {
        self.drawer.run_frame();
    }

    /// Dispatch a raw event.
    pub fn dispatch(&mut self, event: Event<NodeId>) -> EventOutcome {
        self.drawer.handle_event(&event)
    }

    /// Primary click on the element with `id`.
    pub fn click(&mut self, id: &str) -> EventOutcome {
        let node = self.node(id);
        self.click_node(node)
    }

    /// Primary click on `node`.
    pub fn click_node(&mut self, node: NodeId) -> EventOutcome {
        self.dispatch(Event::Click(PointerEvent::new(node)))
    }

    /// Click with modifiers and button.
    pub fn click_with(&mut self, id: &str, button: PointerButton, modifiers: Modifiers) -> EventOutcome {
        let node = self.node(id);
        self.dispatch(Event::Click(
            PointerEvent::new(node).with_button(button).with_modifiers(modifiers),
        ))
    }

    /// Pointer-down on the element with `id`.
    pub fn pointer_down(&mut self, id: &str) -> EventOutcome {
        let node = self.node(id);
        self.pointer_down_node(node)
    }

    /// Pointer-down on `node`.
    pub fn pointer_down_node(&mut self, node: NodeId) -> EventOutcome {
        self.dispatch(Event::PointerDown(PointerEvent::new(node)))
    }

    /// Key press.
    pub fn key(&mut self, code: KeyCode) -> EventOutcome {
        self.dispatch(Event::Key(KeyEvent::new(code)))
    }

    /// Key press with modifiers.
    pub fn key_with(&mut self, code: KeyCode, modifiers: Modifiers) -> EventOutcome {
        self.dispatch(Event::Key(KeyEvent::new(code).with_modifiers(modifiers)))
    }

    /// Viewport resize.
    pub fn resize(&mut self, width: u32, height: u32) -> EventOutcome {
        self.dispatch(Event::Resize { width, height })
    }

    /// Currently focused element.
    #[must_use]
    pub fn focused(&self) -> Option<NodeId> {
        self.doc().focused()
    }

    /// Focus the element with `id` directly.
    pub fn focus(&mut self, id: &str) {
        let node = self.node(id);
        navdrawer_core::Document::focus(self.doc_mut(), &node);
    }
}
