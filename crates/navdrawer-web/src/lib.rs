#![forbid(unsafe_code)]

//! Browser host for navdrawer.
//!
//! - [`input`]: pure mapping from DOM values to navdrawer events, testable on
//!   any target.
//! - [`timer`]: re-arm bookkeeping for the single `setTimeout`.
//! - `dom::WebDocument` (wasm32 only): [`navdrawer::Document`] over the live
//!   DOM.
//! - `mount::mount` (wasm32 only): the `wasm-bindgen` export that binds a
//!   drawer to the page and drives its scheduler from `setTimeout` and
//!   `requestAnimationFrame`.

pub mod input;
pub mod timer;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod mount;

#[cfg(target_arch = "wasm32")]
pub use dom::{WeakElement, WebDocument};
#[cfg(target_arch = "wasm32")]
pub use mount::{DrawerHandle, mount};
