#![forbid(unsafe_code)]

//! Builder for the standard drawer page.
//!
//! ```text
//! body
//! ├── header.site-header (64 px)
//! │   └── button#menuToggle
//! ├── nav#siteNav [aria-hidden=true]
//! │   ├── button#closeMenu
//! │   └── a.nav-link (one per link)
//! ├── div#backdrop [hidden]
//! ├── main
//! │   └── section (one per section)
//! └── footer
//!     └── span#year
//! ```

use crate::mock::{ElementSpec, MockDocument, NodeId};

/// Height of the sticky header on the standard page.
pub const HEADER_HEIGHT: f64 = 64.0;

/// Fluent description of a drawer page.
#[derive(Debug, Clone)]
pub struct PageBuilder {
    header: bool,
    backdrop: bool,
    close_control: bool,
    year: bool,
    links: Vec<(String, String)>,
    sections: Vec<(String, f64)>,
    location: String,
}

impl Default for PageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PageBuilder {
    /// Page skeleton with header, backdrop, close control, and year, but
    /// no links or sections.
    #[must_use]
    pub fn new() -> Self {
        Self {
            header: true,
            backdrop: true,
            close_control: true,
            year: true,
            links: Vec::new(),
            sections: Vec::new(),
            location: "https://example.com/index.html".to_string(),
        }
    }

    /// The marketing page used by most tests: four drawer links, three
    /// sections.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .link("link-services", "#services")
            .link("link-pricing", "#pricing")
            .link("link-contact", "#contact")
            .link("link-about", "about.html")
            .section("services", 600.0)
            .section("pricing", 1200.0)
            .section("contact", 1800.0)
    }

    /// Add a drawer link.
    #[must_use]
    pub fn link(mut self, id: &str, href: &str) -> Self {
        self.links.push((id.to_string(), href.to_string()));
        self
    }

    /// Add a content section at a document-relative top.
    #[must_use]
    pub fn section(mut self, id: &str, top: f64) -> Self {
        self.sections.push((id.to_string(), top));
        self
    }

    /// Omit the sticky header.
    #[must_use]
    pub fn without_header(mut self) -> Self {
        self.header = false;
        self
    }

    /// Omit the backdrop.
    #[must_use]
    pub fn without_backdrop(mut self) -> Self {
        self.backdrop = false;
        self
    }

    /// Omit the close control.
    #[must_use]
    pub fn without_close_control(mut self) -> Self {
        self.close_control = false;
        self
    }

    /// Omit the footer year element.
    #[must_use]
    pub fn without_year(mut self) -> Self {
        self.year = false;
        self
    }

    /// Initial location.
    #[must_use]
    pub fn location(mut self, href: &str) -> Self {
        self.location = href.to_string();
        self
    }

    /// Build the document.
    #[must_use]
    pub fn build(self) -> MockDocument {
        let mut doc = MockDocument::new();
        doc.set_location(&self.location);
        let body = doc.body();

        let header_parent = if self.header {
            doc.append(
                body,
                ElementSpec::new("header")
                    .class("site-header")
                    .height(HEADER_HEIGHT),
            )
        } else {
            body
        };
        doc.append(
            header_parent,
            ElementSpec::new("button")
                .id("menuToggle")
                .attr("aria-controls", "siteNav")
                .attr("aria-expanded", "false")
                .height(40.0),
        );

        let nav = doc.append(
            body,
            ElementSpec::new("nav")
                .id("siteNav")
                .class("drawer")
                .attr("aria-hidden", "true"),
        );
        if self.close_control {
            doc.append(nav, ElementSpec::new("button").id("closeMenu"));
        }
        for (id, href) in &self.links {
            doc.append(
                nav,
                ElementSpec::new("a").id(id).class("nav-link").attr("href", href),
            );
        }

        if self.backdrop {
            doc.append(
                body,
                ElementSpec::new("div")
                    .id("backdrop")
                    .class("backdrop")
                    .attr("hidden", ""),
            );
        }

        let main = doc.append(body, ElementSpec::new("main"));
        for (id, top) in &self.sections {
            doc.append(
                main,
                ElementSpec::new("section").id(id).top(*top).height(500.0),
            );
        }

        let footer = doc.append(body, ElementSpec::new("footer"));
        if self.year {
            doc.append(footer, ElementSpec::new("span").id("year"));
        }
        doc
    }
}

/// Convenience: `PageBuilder::standard().build()`.
#[must_use]
pub fn standard_page() -> MockDocument {
    PageBuilder::standard().build()
}

/// Append an anchor outside the drawer, inside `<main>`.
pub fn add_outside_link(doc: &mut MockDocument, id: &str, href: &str) -> NodeId {
    let parent = navdrawer_core::Document::query_selector(doc, "main").unwrap_or(doc.body());
    doc.append(parent, ElementSpec::new("a").id(id).attr("href", href))
}

#[cfg(test)]
mod tests {
    use super::*;
    use navdrawer_core::Document;

    #[test]
    fn standard_page_has_contract_ids() {
        let doc = standard_page();
        for id in ["menuToggle", "siteNav", "closeMenu", "backdrop", "year", "pricing"] {
            assert!(doc.element_by_id(id).is_some(), "missing #{id}");
        }
        let header = doc.query_selector(".site-header").expect("header");
        assert_eq!(doc.offset_height(&header), HEADER_HEIGHT);
        assert!(doc.is_hidden(doc.id("backdrop")));
    }

    #[test]
    fn optional_parts_can_be_omitted() {
        let doc = PageBuilder::new()
            .without_header()
            .without_backdrop()
            .without_close_control()
            .without_year()
            .build();
        assert!(doc.query_selector(".site-header").is_none());
        assert!(doc.element_by_id("backdrop").is_none());
        assert!(doc.element_by_id("closeMenu").is_none());
        assert!(doc.element_by_id("year").is_none());
        assert!(doc.element_by_id("menuToggle").is_some());
    }
}
