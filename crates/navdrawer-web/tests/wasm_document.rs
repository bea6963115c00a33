#![cfg(target_arch = "wasm32")]
#![forbid(unsafe_code)]

use navdrawer::{Document, DrawerConfig, NodeKind};
use navdrawer_web::WebDocument;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

fn fixture(doc: &WebDocument, html: &str) -> HtmlElement {
    let host = doc
        .document()
        .create_element("div")
        .expect("create div")
        .dyn_into::<HtmlElement>()
        .expect("html element");
    host.set_inner_html(html);
    doc.document()
        .body()
        .expect("body")
        .append_child(&host)
        .expect("append");
    host
}

#[wasm_bindgen_test]
fn node_info_reads_dom_attributes() {
    let doc = WebDocument::new().expect("browser document");
    let host = fixture(
        &doc,
        r##"<nav id="t-nav"><a id="t-link" href="#x" target="_blank">x</a>
            <button id="t-btn" disabled>b</button>
            <div id="t-div" tabindex="-1" aria-hidden="true"></div></nav>"##,
    );

    let link = doc.element_by_id("t-link").expect("link");
    let info = doc.node_info(&link);
    assert_eq!(info.kind, NodeKind::Anchor);
    assert_eq!(info.href.as_deref(), Some("#x"));
    assert!(info.opens_new_context());
    assert!(info.rendered);

    let button = doc.element_by_id("t-btn").expect("button");
    assert!(doc.node_info(&button).disabled);

    let div = doc.element_by_id("t-div").expect("div");
    let info = doc.node_info(&div);
    assert_eq!(info.tab_index, Some(-1));
    assert!(info.aria_hidden);

    let nav = doc.element_by_id("t-nav").expect("nav");
    assert_eq!(doc.descendants(&nav).len(), 3);
    assert!(doc.contains(&nav, &button));
    host.remove();
}

#[wasm_bindgen_test]
fn mutations_reach_the_dom() {
    let mut doc = WebDocument::new().expect("browser document");
    let host = fixture(&doc, r#"<span id="t-year"></span><div id="t-panel"></div>"#);

    let panel = doc.element_by_id("t-panel").expect("panel");
    doc.set_class(&panel, "open", true);
    assert!(panel.class_list().contains("open"));
    doc.set_class(&panel, "open", false);
    assert!(!panel.class_list().contains("open"));

    doc.set_attribute(&panel, "aria-hidden", "false");
    assert_eq!(panel.get_attribute("aria-hidden").as_deref(), Some("false"));

    let previous = doc.body_overflow();
    doc.set_body_overflow("hidden");
    assert_eq!(doc.body_overflow(), "hidden");
    doc.set_body_overflow(&previous);

    navdrawer::stamp_year(&mut doc, &DrawerConfig {
        year_id: "t-year".into(),
        ..DrawerConfig::default()
    });
    let year = doc.element_by_id("t-year").expect("year");
    assert_eq!(year.text_content(), Some(doc.current_year().to_string()));
    host.remove();
}

#[wasm_bindgen_test]
fn weak_handle_resolves_to_the_same_element() {
    let doc = WebDocument::new().expect("browser document");
    let host = fixture(&doc, r#"<button id="t-focus">f</button>"#);

    let button = doc.element_by_id("t-focus").expect("button");
    let weak = doc.downgrade(&button);
    assert_eq!(doc.upgrade(&weak), Some(button.clone()));

    host.remove();
    let upgraded = doc.upgrade(&weak);
    assert!(upgraded.is_none_or(|node| !doc.is_connected(&node)));
}
