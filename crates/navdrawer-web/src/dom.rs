#![forbid(unsafe_code)]

//! [`Document`] over the live browser DOM.
//!
//! Node handles are `web_sys::Element`; equality is JS object identity.
//! DOM calls that can throw are treated as no-ops, matching the trait's
//! "never fails" contract.

use navdrawer::{Document, Error, MotionMode, NodeInfo, NodeKind};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::input::{is_content_editable, parse_tab_index};

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

#[wasm_bindgen]
extern "C" {
    /// A JS `WeakRef` to an element.
    #[wasm_bindgen(js_name = WeakRef)]
    #[derive(Debug, Clone)]
    pub type WeakElement;

    #[wasm_bindgen(constructor, js_class = "WeakRef")]
    fn new(target: &Element) -> WeakElement;

    #[wasm_bindgen(method, js_class = "WeakRef", js_name = deref)]
    fn target(this: &WeakElement) -> Option<Element>;
}

/// The page the script runs in.
#[derive(Debug, Clone)]
pub struct WebDocument {
    window: Window,
    document: web_sys::Document,
}

impl WebDocument {
    /// Bind to the global `window` and its document.
    pub fn new() -> Result<Self, Error> {
        let window = web_sys::window().ok_or_else(|| Error::Host("no global window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| Error::Host("window has no document".into()))?;
        Ok(Self { window, document })
    }

    /// The bound window.
    #[must_use]
    pub const fn window(&self) -> &Window {
        &self.window
    }

    /// The bound document.
    #[must_use]
    pub const fn document(&self) -> &web_sys::Document {
        &self.document
    }

    fn body(&self) -> Option<HtmlElement> {
        self.document.body()
    }
}

impl Document for WebDocument {
    type Node = Element;
    type WeakNode = WeakElement;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_selector(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn descendants(&self, root: &Element) -> Vec<Element> {
        let Ok(list) = root.query_selector_all("*") else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn is_connected(&self, node: &Element) -> bool {
        node.is_connected()
    }

    fn node_info(&self, node: &Element) -> NodeInfo {
        let tag = node.tag_name().to_ascii_lowercase();
        let input_type = node.get_attribute("type");
        let kind = NodeKind::from_tag(&tag, input_type.as_deref());
        let is_anchor = kind == NodeKind::Anchor;

        NodeInfo {
            kind,
            id: Some(node.id()).filter(|id| !id.is_empty()),
            href: if is_anchor { node.get_attribute("href") } else { None },
            tab_index: parse_tab_index(node.get_attribute("tabindex").as_deref()),
            disabled: node.has_attribute("disabled"),
            aria_hidden: node.get_attribute("aria-hidden").as_deref() == Some("true"),
            rendered: node.get_client_rects().length() > 0,
            content_editable: is_content_editable(node.get_attribute("contenteditable").as_deref()),
            browsing_context: if is_anchor { node.get_attribute("target") } else { None },
            download: is_anchor && node.has_attribute("download"),
        }
    }

    fn downgrade(&self, node: &Element) -> WeakElement {
        WeakElement::new(node)
    }

    fn upgrade(&self, weak: &WeakElement) -> Option<Element> {
        weak.target()
    }

    fn active_element(&self) -> Option<Element> {
        self.document.active_element()
    }

    fn focus(&mut self, node: &Element) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            let _ = el.focus();
        }
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) {
        let _ = node.set_attribute(name, value);
    }

    fn set_hidden(&mut self, node: &Element, hidden: bool) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            el.set_hidden(hidden);
        }
    }

    fn set_class(&mut self, node: &Element, class: &str, present: bool) {
        let list = node.class_list();
        let _ = if present {
            list.add_1(class)
        } else {
            list.remove_1(class)
        };
    }

    fn set_text(&mut self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn body_overflow(&self) -> String {
        self.body()
            .and_then(|body| body.style().get_property_value("overflow").ok())
            .unwrap_or_default()
    }

    fn set_body_overflow(&mut self, value: &str) {
        let Some(body) = self.body() else {
            return;
        };
        let style = body.style();
        let _ = if value.is_empty() {
            style.remove_property("overflow").map(drop)
        } else {
            style.set_property("overflow", value)
        };
    }

    fn offset_height(&self, node: &Element) -> f64 {
        node.dyn_ref::<HtmlElement>()
            .map_or(0.0, |el| f64::from(el.offset_height()))
    }

    fn viewport_top(&self, node: &Element) -> f64 {
        node.get_bounding_client_rect().top()
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_to(&mut self, top: f64, mode: MotionMode) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match mode {
            MotionMode::Smooth => ScrollBehavior::Smooth,
            MotionMode::Instant => ScrollBehavior::Instant,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.window
            .match_media(REDUCED_MOTION_QUERY)
            .ok()
            .flatten()
            .is_some_and(|query| query.matches())
    }

    fn location_href(&self) -> String {
        self.window.location().href().unwrap_or_default()
    }

    fn set_location_hash(&mut self, fragment: &str) {
        let _ = self.window.location().set_hash(fragment);
    }

    fn navigate(&mut self, url: &str) {
        tracing::debug!(target: "navdrawer.web", url, "navigating");
        let _ = self.window.location().set_href(url);
    }

    fn current_year(&self) -> i32 {
        js_sys::Date::new_0().get_full_year() as i32
    }
}
