#![forbid(unsafe_code)]

//! Focus capability predicates.
//!
//! Interactivity is decided from [`NodeInfo`] alone, so every host answers
//! the same question the same way:
//!
//! | Element | Interactive when |
//! |---|---|
//! | `a` | it has an `href` |
//! | `button`, `select`, `textarea`, `summary` | always |
//! | `input` | `type` is not `hidden` |
//! | anything | `tabindex >= 0` or `contenteditable` |
//!
//! A negative `tabindex` keeps an element programmatically focusable but
//! removes it from the tab sequence.

use navdrawer_core::{Document, NodeInfo, NodeKind};

/// Whether the element is natively or explicitly interactive.
#[must_use]
pub fn is_interactive(info: &NodeInfo) -> bool {
    let native = match info.kind {
        NodeKind::Anchor => info.href.is_some(),
        NodeKind::Button | NodeKind::Select | NodeKind::TextArea | NodeKind::Summary => true,
        NodeKind::Input { hidden } => !hidden,
        NodeKind::Other => false,
    };
    native || info.content_editable || info.tab_index.is_some_and(|t| t >= 0)
}

/// Whether `focus()` would land on the element.
#[must_use]
pub fn can_receive_focus(info: &NodeInfo) -> bool {
    (is_interactive(info) || info.tab_index.is_some()) && !info.disabled && info.rendered
}

/// Whether the element takes part in sequential (Tab) navigation.
#[must_use]
pub fn is_tabbable(info: &NodeInfo) -> bool {
    can_receive_focus(info) && !info.aria_hidden && info.tab_index.is_none_or(|t| t >= 0)
}

/// Tab-ordered focusable elements inside `container`, in tree order.
///
/// Returns an empty sequence when the container is absent. Elements below an
/// `aria-hidden` ancestor (strictly inside the container) are skipped.
pub fn compute_focusable<D: Document>(doc: &D, container: Option<&D::Node>) -> Vec<D::Node> {
    let Some(container) = container else {
        return Vec::new();
    };
    doc.descendants(container)
        .into_iter()
        .filter(|node| is_tabbable(&doc.node_info(node)))
        .filter(|node| !hidden_below(doc, container, node))
        .collect()
}

/// Whether `node` can still take focus: attached, enabled, rendered.
pub fn is_restorable<D: Document>(doc: &D, node: &D::Node) -> bool {
    doc.is_connected(node) && can_receive_focus(&doc.node_info(node))
}

fn hidden_below<D: Document>(doc: &D, container: &D::Node, node: &D::Node) -> bool {
    let mut cursor = doc.parent(node);
    while let Some(current) = cursor {
        if &current == container {
            return false;
        }
        if doc.node_info(&current).aria_hidden {
            return true;
        }
        cursor = doc.parent(&current);
    }
    false
}
