#![forbid(unsafe_code)]

//! Deterministic test fixtures for navdrawer.
//!
//! - [`mock::MockDocument`]: an in-memory [`navdrawer_core::Document`].
//! - [`page::PageBuilder`]: the standard drawer page and its variations.
//! - [`driver::DrawerHarness`]: a drawer over a mock page with a manual
//!   clock.

pub mod driver;
pub mod mock;
pub mod page;

pub use driver::DrawerHarness;
pub use mock::{ElementSpec, MockDocument, NodeId, ScrollCall};
pub use page::{HEADER_HEIGHT, PageBuilder, add_outside_link, standard_page};
