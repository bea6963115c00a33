#![forbid(unsafe_code)]

//! Stateful drawer components.
//!
//! Leaf first:
//!
//! - [`focus`]: focusability predicates and the Tab trap.
//! - [`scroll`]: sticky-header-aware scrolling.
//! - [`disclosure`]: the open/closed state and its side effects.
//! - [`dismissal`]: which inputs close the drawer.
//! - [`nav_link`]: what a drawer link activation turns into.
//! - [`drawer`]: everything above wired to one document and one scheduler.
//!
//! Components are generic over [`navdrawer_core::Document`], so the same
//! code runs against the browser DOM and the in-memory test document.

pub mod disclosure;
pub mod dismissal;
pub mod drawer;
pub mod focus;
pub mod nav_link;
pub mod outcome;
pub mod scroll;
pub mod task;

pub use disclosure::{
    DisclosureController, DrawerElements, DrawerState, DrawerTransition, TransitionCause,
};
pub use dismissal::DismissalRouter;
pub use drawer::Drawer;
pub use focus::{FocusTrap, TabOutcome, compute_focusable};
pub use nav_link::{LinkAction, NavLinkClassifier};
pub use outcome::EventOutcome;
pub use scroll::{ScrollCoordinator, ScrollRequest};
pub use task::DrawerTask;
