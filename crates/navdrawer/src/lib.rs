#![forbid(unsafe_code)]

//! navdrawer public facade.
//!
//! Re-exports the types most embedders need and provides [`init`], which
//! validates a configuration, stamps the footer year and returns a ready
//! [`Drawer`]. Hosts implement [`Document`]; `navdrawer-web` does so for the
//! browser and `navdrawer-harness` for tests.

pub mod error;

pub use error::{Error, Result};

// --- Core re-exports -------------------------------------------------------

pub use navdrawer_core::{
    Document, Event, KeyCode, KeyEvent, KeyEventKind, LinkKind, Modifiers, MotionMode, NodeInfo,
    NodeKind, PointerButton, PointerEvent,
};

// --- Runtime re-exports ----------------------------------------------------

pub use navdrawer_runtime::{ConfigError, DelayConfig, DrawerConfig};

// --- Widget re-exports -----------------------------------------------------

pub use navdrawer_widgets::{
    Drawer, DrawerElements, DrawerState, DrawerTransition, EventOutcome, TransitionCause,
};

/// Write the host's current year into the footer year element.
///
/// Returns `false` when the page has no such element.
pub fn stamp_year<D: Document>(doc: &mut D, config: &DrawerConfig) -> bool {
    let Some(node) = doc.element_by_id(&config.year_id) else {
        tracing::debug!(target: "navdrawer.init", id = %config.year_id, "no year element");
        return false;
    };
    let year = doc.current_year();
    doc.set_text(&node, &year.to_string());
    true
}

/// Validate `config`, stamp the footer year and build the drawer.
pub fn init<D: Document>(mut doc: D, config: DrawerConfig) -> Result<Drawer<D>> {
    let config = config.validated()?;
    stamp_year(&mut doc, &config);
    let drawer = Drawer::new(doc, config);
    tracing::info!(
        target: "navdrawer.init",
        has_drawer = drawer.elements().drawer.is_some(),
        "drawer initialized"
    );
    Ok(drawer)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Document, Drawer, DrawerConfig, DrawerState, Error, Event, EventOutcome, KeyCode,
        PointerEvent, Result, init,
    };

    pub use crate::{core, runtime, widgets};
}

pub use navdrawer_core as core;
pub use navdrawer_runtime as runtime;
pub use navdrawer_widgets as widgets;
