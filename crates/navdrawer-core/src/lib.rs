#![forbid(unsafe_code)]

//! Core: input events, the host document abstraction, and link resolution.
//!
//! # Role in navdrawer
//! `navdrawer-core` is the input layer. It owns the canonical event types,
//! the [`document::Document`] trait every component is written against, and
//! the href classifier that decides between in-page scrolling and
//! cross-document navigation.
//!
//! # How it fits in the system
//! The runtime (`navdrawer-runtime`) schedules deferred work, the widgets
//! crate (`navdrawer-widgets`) implements the drawer on top of these types,
//! and hosts (`navdrawer-web`, `navdrawer-harness`) implement `Document`.

pub mod document;
pub mod event;
pub mod href;
pub mod logging;

pub use document::{Document, MotionMode, NodeInfo, NodeKind};
pub use event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, PointerButton, PointerEvent};
pub use href::{LinkKind, LinkTarget, WebUrl, classify, decode_fragment};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
