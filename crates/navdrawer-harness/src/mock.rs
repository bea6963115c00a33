#![forbid(unsafe_code)]

//! In-memory [`Document`] for deterministic tests.
//!
//! Nodes live in an arena indexed by [`NodeId`]. Removing a node clears its
//! slot, so stale handles held by the drawer (for example a focus snapshot)
//! simply stop resolving instead of keeping the element alive.
//!
//! Geometry is static: each element has a document-relative `top` and a
//! `height`, and the viewport is described by a single `scroll_y`. Every
//! viewport scroll and navigation is recorded for assertions.

use ahash::AHashMap;
use navdrawer_core::{Document, MotionMode, NodeInfo, NodeKind};

/// Opaque handle into a [`MockDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Declarative description of an element to append.
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    tag: String,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    top: f64,
    height: f64,
    display_none: bool,
}

impl ElementSpec {
    /// Element with the given tag name.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Set the `id` attribute.
    #[must_use]
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    /// Set an arbitrary attribute.
    #[must_use]
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    /// Add a class.
    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    /// Document-relative top edge, in CSS pixels.
    #[must_use]
    pub fn top(mut self, top: f64) -> Self {
        self.top = top;
        self
    }

    /// Rendered height, in CSS pixels.
    #[must_use]
    pub fn height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    /// Render the element with `display: none`.
    #[must_use]
    pub fn display_none(mut self) -> Self {
        self.display_none = true;
        self
    }
}

/// One recorded viewport scroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCall {
    /// Requested document position.
    pub top: f64,
    /// Requested motion.
    pub mode: MotionMode,
}

#[derive(Debug, Clone)]
struct MockNode {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    text: String,
    top: f64,
    height: f64,
    display_none: bool,
}

impl MockNode {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    fn remove_attribute(&mut self, name: &str) {
        self.attributes.retain(|(n, _)| n != name);
    }
}

/// In-memory document with a `<body>` root.
#[derive(Debug, Clone)]
pub struct MockDocument {
    nodes: Vec<Option<MockNode>>,
    ids: AHashMap<String, NodeId>,
    body: NodeId,
    focused: Option<NodeId>,
    body_overflow: String,
    scroll_y: f64,
    scrolls: Vec<ScrollCall>,
    reduced_motion: bool,
    location: String,
    navigations: Vec<String>,
    year: i32,
}

impl Default for MockDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDocument {
    /// Empty document at `https://example.com/index.html`.
    #[must_use]
    pub fn new() -> Self {
        let body = MockNode {
            tag: "body".to_string(),
            parent: None,
            children: Vec::new(),
            attributes: Vec::new(),
            classes: Vec::new(),
            text: String::new(),
            top: 0.0,
            height: 0.0,
            display_none: false,
        };
        Self {
            nodes: vec![Some(body)],
            ids: AHashMap::new(),
            body: NodeId(0),
            focused: None,
            body_overflow: String::new(),
            scroll_y: 0.0,
            scrolls: Vec::new(),
            reduced_motion: false,
            location: "https://example.com/index.html".to_string(),
            navigations: Vec::new(),
            year: 2026,
        }
    }

    /// The `<body>` element.
    #[must_use]
    pub const fn body(&self) -> NodeId {
        self.body
    }

    /// Append a new element under `parent` and return its handle.
    pub fn append(&mut self, parent: NodeId, spec: ElementSpec) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let mut node = MockNode {
            tag: spec.tag,
            parent: Some(parent),
            children: Vec::new(),
            attributes: Vec::new(),
            classes: spec.classes,
            text: String::new(),
            top: spec.top,
            height: spec.height,
            display_none: spec.display_none,
        };
        for (name, value) in &spec.attributes {
            node.set_attribute(name, value);
        }
        if let Some(dom_id) = node.attribute("id") {
            self.ids.entry(dom_id.to_string()).or_insert(id);
        }
        self.nodes.push(Some(node));
        if let Some(p) = self.node_mut(parent) {
            p.children.push(id);
        }
        id
    }

    /// Detach `node` and its subtree. Handles to removed nodes stay valid
    /// values but no longer resolve.
    pub fn remove(&mut self, node: NodeId) {
        if node == self.body {
            return;
        }
        if let Some(parent) = self.node(node).and_then(|n| n.parent)
            && let Some(p) = self.node_mut(parent)
        {
            p.children.retain(|c| *c != node);
        }
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            let Some(removed) = self.nodes.get_mut(current.index()).and_then(Option::take) else {
                continue;
            };
            if let Some(dom_id) = removed.attribute("id")
                && self.ids.get(dom_id) == Some(&current)
            {
                self.ids.remove(dom_id);
            }
            if self.focused == Some(current) {
                self.focused = None;
            }
            stack.extend(removed.children);
        }
    }

    /// Element by id; panics if absent. Test convenience.
    #[must_use]
    pub fn id(&self, id: &str) -> NodeId {
        match self.ids.get(id) {
            Some(node) => *node,
            None => panic!("no element with id {id:?}"),
        }
    }

    /// Current value of an attribute.
    #[must_use]
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node)?.attribute(name)
    }

    /// Remove an attribute.
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(n) = self.node_mut(node) {
            n.remove_attribute(name);
        }
    }

    /// Whether `node` carries `class`.
    #[must_use]
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node).is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    /// Whether the `hidden` attribute is set.
    #[must_use]
    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.attribute(node, "hidden").is_some()
    }

    /// Text content set through [`Document::set_text`].
    #[must_use]
    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|n| n.text.as_str())
    }

    /// Toggle `display: none`.
    pub fn set_display_none(&mut self, node: NodeId, none: bool) {
        if let Some(n) = self.node_mut(node) {
            n.display_none = none;
        }
    }

    /// Change the rendered height of an element.
    pub fn set_height(&mut self, node: NodeId, height: f64) {
        if let Some(n) = self.node_mut(node) {
            n.height = height;
        }
    }

    /// Set the reduced-motion preference.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    /// Scroll without recording a call.
    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y;
    }

    /// Replace the current location without recording a navigation.
    pub fn set_location(&mut self, href: &str) {
        self.location = href.to_string();
    }

    /// Set the year reported by [`Document::current_year`].
    pub fn set_year(&mut self, year: i32) {
        self.year = year;
    }

    /// Overwrite the body overflow without going through the drawer.
    pub fn set_body_overflow_raw(&mut self, value: &str) {
        self.body_overflow = value.to_string();
    }

    /// Focused element, without the body fallback.
    #[must_use]
    pub const fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Every viewport scroll so far.
    #[must_use]
    pub fn scrolls(&self) -> &[ScrollCall] {
        &self.scrolls
    }

    /// The most recent viewport scroll.
    #[must_use]
    pub fn last_scroll(&self) -> Option<ScrollCall> {
        self.scrolls.last().copied()
    }

    /// Every navigation so far.
    #[must_use]
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    fn node(&self, id: NodeId) -> Option<&MockNode> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut MockNode> {
        self.nodes.get_mut(id.index()).and_then(Option::as_mut)
    }

    fn is_rendered(&self, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let Some(node) = self.node(current) else {
                return false;
            };
            if node.display_none || node.attribute("hidden").is_some() {
                return false;
            }
            cursor = node.parent;
        }
        true
    }

    fn matches(&self, id: NodeId, selector: &str) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        if let Some(dom_id) = selector.strip_prefix('#') {
            node.attribute("id") == Some(dom_id)
        } else if let Some(class) = selector.strip_prefix('.') {
            node.classes.iter().any(|c| c == class)
        } else {
            node.tag.eq_ignore_ascii_case(selector)
        }
    }
}

impl Document for MockDocument {
    type Node = NodeId;
    type WeakNode = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        let selector = selector.trim();
        if selector.is_empty() {
            return None;
        }
        std::iter::once(self.body)
            .chain(self.descendants(&self.body))
            .find(|id| self.matches(*id, selector))
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.node(*node)?.parent
    }

    fn descendants(&self, root: &NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let Some(root) = self.node(*root) else {
            return out;
        };
        let mut stack: Vec<NodeId> = root.children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if let Some(node) = self.node(current) {
                out.push(current);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    fn is_connected(&self, node: &NodeId) -> bool {
        self.node(*node).is_some()
    }

    fn node_info(&self, node: &NodeId) -> NodeInfo {
        let Some(n) = self.node(*node) else {
            return NodeInfo {
                rendered: false,
                ..NodeInfo::default()
            };
        };
        let kind = NodeKind::from_tag(&n.tag, n.attribute("type"));
        let is_anchor = kind == NodeKind::Anchor;
        NodeInfo {
            kind,
            id: n.attribute("id").map(str::to_string),
            href: if is_anchor {
                n.attribute("href").map(str::to_string)
            } else {
                None
            },
            tab_index: n.attribute("tabindex").and_then(|t| t.trim().parse().ok()),
            disabled: n.attribute("disabled").is_some(),
            aria_hidden: n.attribute("aria-hidden") == Some("true"),
            rendered: self.is_rendered(*node),
            content_editable: n
                .attribute("contenteditable")
                .is_some_and(|v| !v.eq_ignore_ascii_case("false")),
            browsing_context: if is_anchor {
                n.attribute("target").map(str::to_string)
            } else {
                None
            },
            download: is_anchor && n.attribute("download").is_some(),
        }
    }

    fn downgrade(&self, node: &NodeId) -> NodeId {
        *node
    }

    fn upgrade(&self, weak: &NodeId) -> Option<NodeId> {
        self.node(*weak).map(|_| *weak)
    }

    fn active_element(&self) -> Option<NodeId> {
        Some(self.focused.unwrap_or(self.body))
    }

    fn focus(&mut self, node: &NodeId) {
        if self.is_connected(node) {
            self.focused = Some(*node);
        }
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        if let Some(n) = self.node_mut(*node) {
            n.set_attribute(name, value);
        }
    }

    fn set_hidden(&mut self, node: &NodeId, hidden: bool) {
        if let Some(n) = self.node_mut(*node) {
            if hidden {
                n.set_attribute("hidden", "");
            } else {
                n.remove_attribute("hidden");
            }
        }
    }

    fn set_class(&mut self, node: &NodeId, class: &str, present: bool) {
        if let Some(n) = self.node_mut(*node) {
            let has = n.classes.iter().any(|c| c == class);
            if present && !has {
                n.classes.push(class.to_string());
            } else if !present {
                n.classes.retain(|c| c != class);
            }
        }
    }

    fn set_text(&mut self, node: &NodeId, text: &str) {
        if let Some(n) = self.node_mut(*node) {
            n.text = text.to_string();
        }
    }

    fn body_overflow(&self) -> String {
        self.body_overflow.clone()
    }

    fn set_body_overflow(&mut self, value: &str) {
        self.body_overflow = value.to_string();
    }

    fn offset_height(&self, node: &NodeId) -> f64 {
        if !self.is_rendered(*node) {
            return 0.0;
        }
        self.node(*node).map_or(0.0, |n| n.height)
    }

    fn viewport_top(&self, node: &NodeId) -> f64 {
        self.node(*node).map_or(0.0, |n| n.top - self.scroll_y)
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn scroll_to(&mut self, top: f64, mode: MotionMode) {
        self.scroll_y = top;
        self.scrolls.push(ScrollCall { top, mode });
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn location_href(&self) -> String {
        self.location.clone()
    }

    fn set_location_hash(&mut self, fragment: &str) {
        let base = self
            .location
            .split_once('#')
            .map_or(self.location.as_str(), |(base, _)| base)
            .to_string();
        self.location = if fragment.is_empty() {
            base
        } else {
            format!("{base}#{fragment}")
        };
    }

    fn navigate(&mut self, url: &str) {
        self.navigations.push(url.to_string());
        self.location = url.to_string();
    }

    fn current_year(&self) -> i32 {
        self.year
    }
}
