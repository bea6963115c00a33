#![forbid(unsafe_code)]

//! Host document abstraction.
//!
//! Every drawer component talks to the page through [`Document`]. The trait
//! covers exactly what the drawer needs from a tree of addressable elements:
//! lookups, per-node capability queries, attribute and class writes, focus,
//! the body scroll lock, viewport scrolling, and location changes.
//!
//! # Invariants
//!
//! - [`Document::descendants`] yields nodes in tree (document) order and never
//!   includes the root itself.
//! - State held across transitions stores [`Document::WeakNode`], never a
//!   strong [`Document::Node`], and re-validates after
//!   [`Document::upgrade`] with [`Document::is_connected`].
//!
//! # Failure Modes
//!
//! Writes to disconnected nodes are silently ignored by implementations.
//! None of the methods fail; a host that cannot answer a query returns the
//! neutral value (`None`, `0.0`, empty string).

use std::fmt;

/// Element kind, as far as interactivity is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeKind {
    /// `<a>` element.
    Anchor,
    /// `<button>` element.
    Button,
    /// `<input>` element.
    Input {
        /// `type="hidden"`.
        hidden: bool,
    },
    /// `<select>` element.
    Select,
    /// `<textarea>` element.
    TextArea,
    /// `<summary>` element.
    Summary,
    /// Anything else.
    #[default]
    Other,
}

impl NodeKind {
    /// Classify a lowercase tag name plus its `type` attribute.
    #[must_use]
    pub fn from_tag(tag: &str, input_type: Option<&str>) -> Self {
        match tag {
            "a" => Self::Anchor,
            "button" => Self::Button,
            "input" => Self::Input {
                hidden: input_type.is_some_and(|t| t.eq_ignore_ascii_case("hidden")),
            },
            "select" => Self::Select,
            "textarea" => Self::TextArea,
            "summary" => Self::Summary,
            _ => Self::Other,
        }
    }
}

/// Snapshot of the node properties the drawer cares about.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeInfo {
    /// Element kind.
    pub kind: NodeKind,
    /// The `id` attribute.
    pub id: Option<String>,
    /// Raw `href` attribute (anchors only).
    pub href: Option<String>,
    /// Parsed `tabindex` attribute.
    pub tab_index: Option<i32>,
    /// `disabled` attribute present.
    pub disabled: bool,
    /// `aria-hidden="true"` on this node.
    pub aria_hidden: bool,
    /// The node currently produces a layout box.
    pub rendered: bool,
    /// `contenteditable` is set and not `"false"`.
    pub content_editable: bool,
    /// Raw `target` attribute (anchors only).
    pub browsing_context: Option<String>,
    /// `download` attribute present.
    pub download: bool,
}

impl NodeInfo {
    /// Info for a node of the given kind that is rendered and enabled.
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            rendered: true,
            ..Self::default()
        }
    }

    /// True when the link asks for a new browsing context or a download.
    #[must_use]
    pub fn opens_new_context(&self) -> bool {
        self.download
            || self
                .browsing_context
                .as_deref()
                .is_some_and(|t| !t.is_empty() && !t.eq_ignore_ascii_case("_self"))
    }
}

/// How a viewport scroll is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MotionMode {
    /// Animated scroll.
    #[default]
    Smooth,
    /// Jump straight to the position.
    Instant,
}

impl MotionMode {
    /// Pick the mode for the user's reduced-motion preference.
    #[must_use]
    pub const fn for_preference(reduced_motion: bool) -> Self {
        if reduced_motion {
            Self::Instant
        } else {
            Self::Smooth
        }
    }
}

/// A tree of addressable, interactive elements plus the page around it.
pub trait Document {
    /// Node handle. Cheap to clone; equality is node identity.
    type Node: Clone + PartialEq + fmt::Debug;

    /// Handle that does not keep its element alive.
    type WeakNode: Clone + fmt::Debug;

    // --- Lookup ---

    /// Element with the given `id` attribute.
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// First element matching a simple selector (`#id`, `.class`, `tag`).
    fn query_selector(&self, selector: &str) -> Option<Self::Node>;

    /// Parent element, `None` at the root.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// All descendant elements of `root` in tree order.
    fn descendants(&self, root: &Self::Node) -> Vec<Self::Node>;

    /// Whether `node` is still attached to the document.
    fn is_connected(&self, node: &Self::Node) -> bool;

    /// Capability snapshot of `node`.
    fn node_info(&self, node: &Self::Node) -> NodeInfo;

    /// Weak handle to `node`.
    fn downgrade(&self, node: &Self::Node) -> Self::WeakNode;

    /// The node behind `weak`, unless it has been dropped or removed.
    fn upgrade(&self, weak: &Self::WeakNode) -> Option<Self::Node>;

    // --- Focus ---

    /// The element that currently has focus.
    fn active_element(&self) -> Option<Self::Node>;

    /// Move focus to `node`.
    fn focus(&mut self, node: &Self::Node);

    // --- Mutation ---

    /// Set an attribute.
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);

    /// Set or clear the `hidden` property.
    fn set_hidden(&mut self, node: &Self::Node, hidden: bool);

    /// Add (`present = true`) or remove a class.
    fn set_class(&mut self, node: &Self::Node, class: &str, present: bool);

    /// Replace the text content of `node`.
    fn set_text(&mut self, node: &Self::Node, text: &str);

    /// Inline `overflow` style of the body; empty when unset.
    fn body_overflow(&self) -> String;

    /// Write the inline `overflow` style of the body; empty removes it.
    fn set_body_overflow(&mut self, value: &str);

    // --- Geometry / viewport ---

    /// Rendered height of `node` in CSS pixels.
    fn offset_height(&self, node: &Self::Node) -> f64;

    /// Top edge of `node` relative to the viewport.
    fn viewport_top(&self, node: &Self::Node) -> f64;

    /// Current vertical scroll offset of the page.
    fn scroll_y(&self) -> f64;

    /// Scroll the viewport to an absolute document position.
    fn scroll_to(&mut self, top: f64, mode: MotionMode);

    /// User prefers reduced motion.
    fn prefers_reduced_motion(&self) -> bool;

    // --- Location ---

    /// Absolute URL of the current document.
    fn location_href(&self) -> String;

    /// Set the location fragment (without the leading `#`).
    fn set_location_hash(&mut self, fragment: &str);

    /// Navigate to an absolute URL.
    fn navigate(&mut self, url: &str);

    // --- Environment ---

    /// Current calendar year according to the host.
    fn current_year(&self) -> i32;

    // --- Provided ---

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool {
        let mut cursor = Some(node.clone());
        while let Some(current) = cursor {
            if &current == ancestor {
                return true;
            }
            cursor = self.parent(&current);
        }
        false
    }

    /// Nearest inclusive ancestor of `node` matching `pred`.
    fn closest(
        &self,
        node: &Self::Node,
        mut pred: impl FnMut(&NodeInfo) -> bool,
    ) -> Option<Self::Node>
    where
        Self: Sized,
    {
        let mut cursor = Some(node.clone());
        while let Some(current) = cursor {
            if pred(&self.node_info(&current)) {
                return Some(current);
            }
            cursor = self.parent(&current);
        }
        None
    }

    /// Fragment of the current location, without `#` and percent-decoded;
    /// `None` when empty.
    fn location_fragment(&self) -> Option<String> {
        let href = self.location_href();
        let (_, fragment) = href.split_once('#')?;
        (!fragment.is_empty()).then(|| crate::href::decode_fragment(fragment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_classification() {
        assert_eq!(NodeKind::from_tag("a", None), NodeKind::Anchor);
        assert_eq!(
            NodeKind::from_tag("input", Some("HIDDEN")),
            NodeKind::Input { hidden: true }
        );
        assert_eq!(
            NodeKind::from_tag("input", Some("text")),
            NodeKind::Input { hidden: false }
        );
        assert_eq!(NodeKind::from_tag("div", None), NodeKind::Other);
    }

    #[test]
    fn new_context_detection() {
        let mut info = NodeInfo::new(NodeKind::Anchor);
        assert!(!info.opens_new_context());
        info.browsing_context = Some("_self".into());
        assert!(!info.opens_new_context());
        info.browsing_context = Some("_blank".into());
        assert!(info.opens_new_context());
        info.browsing_context = None;
        info.download = true;
        assert!(info.opens_new_context());
    }

    #[test]
    fn motion_mode_follows_preference() {
        assert_eq!(MotionMode::for_preference(true), MotionMode::Instant);
        assert_eq!(MotionMode::for_preference(false), MotionMode::Smooth);
    }
}
