#![forbid(unsafe_code)]

//! Classification of link activations inside the drawer.
//!
//! A plain activation of a drawer link closes the drawer first and then
//! either scrolls (in-page destinations) or navigates (other documents)
//! once the close transition is under way. Activations that ask the browser
//! for something else are left alone:
//!
//! - any modifier key (ctrl, cmd, shift, alt),
//! - a non-primary button,
//! - `target` other than `_self`, or `download`,
//! - a bare `#`, a missing href, or a non-web scheme (`mailto:`, `tel:`).

use std::time::Duration;

use navdrawer_core::{Document, LinkKind, Modifiers, NodeKind, PointerButton, PointerEvent, classify};
use navdrawer_runtime::{DelayConfig, Deferral};

use crate::task::DrawerTask;

/// What to do with a drawer link activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkAction {
    /// Not intercepted: default action proceeds and the drawer stays as is.
    PassThrough,
    /// Close, then scroll to the fragment.
    ScrollAfterClose(String),
    /// Close, then navigate to the absolute URL.
    NavigateAfterClose(String),
}

impl LinkAction {
    /// Whether the drawer takes over the activation.
    #[must_use]
    pub const fn intercepts(&self) -> bool {
        !matches!(self, Self::PassThrough)
    }
}

/// Turns drawer link activations into [`LinkAction`]s and deferred tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLinkClassifier {
    scroll_delay: Duration,
    navigate_delay: Duration,
}

impl Default for NavLinkClassifier {
    fn default() -> Self {
        Self::from_delays(&DelayConfig::default())
    }
}

impl NavLinkClassifier {
    /// Classifier using the link delays from `delays`.
    #[must_use]
    pub const fn from_delays(delays: &DelayConfig) -> Self {
        Self {
            scroll_delay: delays.link_scroll(),
            navigate_delay: delays.navigate(),
        }
    }

    /// Classify an activation of `anchor` described by `pointer`.
    pub fn classify<D: Document>(
        &self,
        doc: &D,
        anchor: &D::Node,
        pointer: &PointerEvent<D::Node>,
    ) -> LinkAction {
        let info = doc.node_info(anchor);
        if !pointer.modifiers.is_empty()
            || pointer.button != PointerButton::Primary
            || info.opens_new_context()
        {
            tracing::debug!(
                target: "navdrawer.nav_link",
                modifiers = pointer.modifiers.bits(),
                button = ?pointer.button,
                new_context = info.opens_new_context(),
                "link left to the browser"
            );
            return LinkAction::PassThrough;
        }
        let Some(href) = info.href.as_deref() else {
            return LinkAction::PassThrough;
        };
        let Some(target) = classify(href, &doc.location_href()) else {
            tracing::debug!(target: "navdrawer.nav_link", href, "link not intercepted");
            return LinkAction::PassThrough;
        };

        let action = match (target.kind, target.fragment, target.url) {
            (LinkKind::Fragment | LinkKind::SameDocumentFragment, Some(fragment), _) => {
                LinkAction::ScrollAfterClose(fragment)
            }
            (LinkKind::CrossDocument, _, Some(url)) => LinkAction::NavigateAfterClose(url),
            _ => LinkAction::PassThrough,
        };
        tracing::debug!(
            target: "navdrawer.nav_link",
            href,
            kind = ?target.kind,
            action = ?action,
            "link classified"
        );
        action
    }

    /// Deferred task that completes `action` after the drawer closed.
    #[must_use]
    pub fn follow_up(&self, action: LinkAction) -> Option<(DrawerTask, Deferral)> {
        match action {
            LinkAction::PassThrough => None,
            LinkAction::ScrollAfterClose(fragment) => Some((
                DrawerTask::ScrollToFragment(fragment),
                Deferral::After(self.scroll_delay),
            )),
            LinkAction::NavigateAfterClose(url) => {
                Some((DrawerTask::Navigate(url), Deferral::After(self.navigate_delay)))
            }
        }
    }
}

/// Nearest inclusive ancestor of `node` that is an anchor with an href.
pub fn enclosing_link<D: Document>(doc: &D, node: &D::Node) -> Option<D::Node> {
    doc.closest(node, |info| info.kind == NodeKind::Anchor && info.href.is_some())
}

/// For an anchor outside the drawer: the fragment to scroll to, if the link
/// is a plain `#id` whose element exists and the click is unmodified.
pub fn outside_fragment<D: Document>(
    doc: &D,
    anchor: &D::Node,
    pointer: &PointerEvent<D::Node>,
) -> Option<String> {
    if pointer.modifiers != Modifiers::NONE || pointer.button != PointerButton::Primary {
        return None;
    }
    let href = doc.node_info(anchor).href?;
    let target = classify(&href, &doc.location_href())?;
    let fragment = match target.kind {
        LinkKind::Fragment => target.fragment?,
        _ => return None,
    };
    doc.element_by_id(&fragment).map(|_| fragment)
}
