#![forbid(unsafe_code)]

//! Sticky-header-aware viewport scrolling.
//!
//! Targets are aligned so their top edge lands just below the sticky header:
//! `document_top(target) - (header_height + padding)`, clamped at 0. Motion
//! is instant when the user prefers reduced motion, smooth otherwise.

use navdrawer_core::{Document, MotionMode};
use navdrawer_runtime::DrawerConfig;

/// One resolved scroll, ready to apply.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollRequest {
    /// Id of the element to bring into view.
    pub target_element_id: String,
    /// Header offset at the time the request was built.
    pub header_offset_px: f64,
    /// Motion to use.
    pub motion_mode: MotionMode,
}

/// Computes header offsets and performs aligned scrolls.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollCoordinator {
    header_selector: String,
    header_padding_px: f64,
}

impl Default for ScrollCoordinator {
    fn default() -> Self {
        Self::from_config(&DrawerConfig::default())
    }
}

impl ScrollCoordinator {
    /// Coordinator for the given header selector and padding.
    #[must_use]
    pub fn new(header_selector: impl Into<String>, header_padding_px: f64) -> Self {
        Self {
            header_selector: header_selector.into(),
            header_padding_px,
        }
    }

    /// Coordinator configured from a [`DrawerConfig`].
    #[must_use]
    pub fn from_config(config: &DrawerConfig) -> Self {
        Self::new(config.header_selector.clone(), config.header_padding_px)
    }

    /// Sticky header height plus padding, or 0 without a header.
    pub fn header_offset<D: Document>(&self, doc: &D) -> f64 {
        doc.query_selector(&self.header_selector)
            .map_or(0.0, |header| doc.offset_height(&header) + self.header_padding_px)
    }

    /// Build a request for the element with id `target_element_id`.
    pub fn request<D: Document>(&self, doc: &D, target_element_id: &str) -> ScrollRequest {
        ScrollRequest {
            target_element_id: target_element_id.to_string(),
            header_offset_px: self.header_offset(doc),
            motion_mode: MotionMode::for_preference(doc.prefers_reduced_motion()),
        }
    }

    /// Apply `request`. Returns `false` if the target element is absent.
    pub fn scroll_to<D: Document>(&self, doc: &mut D, request: &ScrollRequest) -> bool {
        let Some(target) = doc.element_by_id(&request.target_element_id) else {
            tracing::debug!(
                target: "navdrawer.scroll",
                id = %request.target_element_id,
                "scroll target missing"
            );
            return false;
        };
        let top = (doc.viewport_top(&target) + doc.scroll_y() - request.header_offset_px).max(0.0);
        tracing::debug!(
            target: "navdrawer.scroll",
            id = %request.target_element_id,
            top,
            offset = request.header_offset_px,
            mode = ?request.motion_mode,
            "scrolling to target"
        );
        doc.scroll_to(top, request.motion_mode);
        true
    }

    /// Resolve and scroll to the element with id `fragment` in one step.
    pub fn scroll_to_fragment<D: Document>(&self, doc: &mut D, fragment: &str) -> bool {
        if fragment.is_empty() {
            return false;
        }
        let request = self.request(doc, fragment);
        self.scroll_to(doc, &request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navdrawer_harness::{HEADER_HEIGHT, PageBuilder, standard_page};

    #[test]
    fn header_offset_adds_padding() {
        let doc = standard_page();
        let coord = ScrollCoordinator::default();
        assert_eq!(coord.header_offset(&doc), HEADER_HEIGHT + 12.0);
    }

    #[test]
    fn no_header_means_no_offset() {
        let doc = PageBuilder::standard().without_header().build();
        assert_eq!(ScrollCoordinator::default().header_offset(&doc), 0.0);
    }

    #[test]
    fn hidden_header_contributes_only_padding() {
        let mut doc = standard_page();
        let header = doc.query_selector(".site-header").expect("header");
        doc.set_display_none(header, true);
        assert_eq!(ScrollCoordinator::default().header_offset(&doc), 12.0);
    }

    #[test]
    fn scroll_aligns_below_header() {
        let mut doc = standard_page();
        doc.set_scroll_y(300.0);
        assert!(ScrollCoordinator::default().scroll_to_fragment(&mut doc, "pricing"));
        let call = doc.last_scroll().expect("scrolled");
        assert_eq!(call.top, 1200.0 - 76.0);
        assert_eq!(call.mode, MotionMode::Smooth);
    }

    #[test]
    fn reduced_motion_scrolls_instantly() {
        let mut doc = standard_page();
        doc.set_reduced_motion(true);
        let coord = ScrollCoordinator::default();
        let request = coord.request(&doc, "services");
        assert_eq!(request.motion_mode, MotionMode::Instant);
        assert!(coord.scroll_to(&mut doc, &request));
        assert_eq!(doc.last_scroll().map(|c| c.mode), Some(MotionMode::Instant));
    }

    #[test]
    fn top_is_clamped_at_zero() {
        let mut doc = PageBuilder::new().section("hero", 10.0).build();
        assert!(ScrollCoordinator::default().scroll_to_fragment(&mut doc, "hero"));
        assert_eq!(doc.last_scroll().map(|c| c.top), Some(0.0));
    }

    #[test]
    fn missing_target_does_not_scroll() {
        let mut doc = standard_page();
        assert!(!ScrollCoordinator::default().scroll_to_fragment(&mut doc, "nope"));
        assert!(!ScrollCoordinator::default().scroll_to_fragment(&mut doc, ""));
        assert!(doc.scrolls().is_empty());
    }

    #[test]
    fn custom_header_selector_and_padding() {
        let doc = standard_page();
        let coord = ScrollCoordinator::new("header", 20.0);
        assert_eq!(coord.header_offset(&doc), HEADER_HEIGHT + 20.0);
    }
}
