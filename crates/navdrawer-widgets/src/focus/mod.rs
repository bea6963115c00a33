#![forbid(unsafe_code)]

//! Focus management for the drawer.
//!
//! [`focusable`] decides which elements can take focus; [`trap`] keeps Tab
//! inside the drawer while it is open.

pub mod focusable;
pub mod trap;

pub use focusable::{can_receive_focus, compute_focusable, is_interactive, is_restorable, is_tabbable};
pub use trap::{FocusTrap, TabOutcome};

#[cfg(test)]
mod tests {
    use super::*;
    use navdrawer_core::{Document, KeyCode, KeyEvent, Modifiers};
    use navdrawer_harness::{ElementSpec, MockDocument, NodeId};

    struct Fixture {
        doc: MockDocument,
        nav: NodeId,
        close: NodeId,
        a: NodeId,
        b: NodeId,
        outside: NodeId,
    }

    fn fixture() -> Fixture {
        let mut doc = MockDocument::new();
        let body = doc.body();
        let outside = doc.append(body, ElementSpec::new("button").id("outside"));
        let nav = doc.append(body, ElementSpec::new("nav").id("nav"));
        let close = doc.append(nav, ElementSpec::new("button").id("close"));
        let a = doc.append(nav, ElementSpec::new("a").id("a").attr("href", "#a"));
        let b = doc.append(nav, ElementSpec::new("a").id("b").attr("href", "#b"));
        Fixture {
            doc,
            nav,
            close,
            a,
            b,
            outside,
        }
    }

    fn tab() -> KeyEvent {
        KeyEvent::new(KeyCode::Tab)
    }

    fn shift_tab() -> KeyEvent {
        KeyEvent::new(KeyCode::Tab).with_modifiers(Modifiers::SHIFT)
    }

    fn active_trap() -> FocusTrap {
        let mut trap = FocusTrap::new();
        trap.activate();
        trap
    }

    #[test]
    fn focusable_sequence_is_tree_ordered() {
        let f = fixture();
        assert_eq!(compute_focusable(&f.doc, Some(&f.nav)), vec![f.close, f.a, f.b]);
    }

    #[test]
    fn absent_container_yields_nothing() {
        let f = fixture();
        assert!(compute_focusable::<MockDocument>(&f.doc, None).is_empty());
    }

    #[test]
    fn excluded_elements_are_skipped() {
        let mut f = fixture();
        f.doc.set_attribute(&f.close, "disabled", "");
        f.doc.set_attribute(&f.a, "tabindex", "-1");
        let group = f.doc.append(f.nav, ElementSpec::new("div").attr("aria-hidden", "true"));
        f.doc.append(group, ElementSpec::new("button"));
        let gone = f.doc.append(f.nav, ElementSpec::new("button").display_none());
        assert_eq!(compute_focusable(&f.doc, Some(&f.nav)), vec![f.b]);
        assert!(!is_tabbable(&f.doc.node_info(&gone)));
    }

    #[test]
    fn aria_hidden_container_does_not_hide_its_own_children() {
        let mut f = fixture();
        f.doc.set_attribute(&f.nav, "aria-hidden", "true");
        assert_eq!(compute_focusable(&f.doc, Some(&f.nav)).len(), 3);
    }

    #[test]
    fn tab_on_last_wraps_to_first() {
        let mut f = fixture();
        f.doc.focus(&f.b);
        let out = active_trap().handle_tab_key(&mut f.doc, Some(&f.nav), &tab());
        assert_eq!(out, TabOutcome::Wrapped);
        assert!(out.prevents_default());
        assert_eq!(f.doc.focused(), Some(f.close));
    }

    #[test]
    fn shift_tab_on_first_wraps_to_last() {
        let mut f = fixture();
        f.doc.focus(&f.close);
        let out = active_trap().handle_tab_key(&mut f.doc, Some(&f.nav), &shift_tab());
        assert_eq!(out, TabOutcome::Wrapped);
        assert_eq!(f.doc.focused(), Some(f.b));
    }

    #[test]
    fn tab_in_the_middle_passes_through() {
        let mut f = fixture();
        f.doc.focus(&f.a);
        let trap = active_trap();
        assert_eq!(trap.handle_tab_key(&mut f.doc, Some(&f.nav), &tab()), TabOutcome::Passed);
        assert_eq!(trap.handle_tab_key(&mut f.doc, Some(&f.nav), &shift_tab()), TabOutcome::Passed);
        assert_eq!(f.doc.focused(), Some(f.a));
    }

    #[test]
    fn focus_outside_is_pulled_in() {
        let mut f = fixture();
        f.doc.focus(&f.outside);
        let trap = active_trap();
        trap.handle_tab_key(&mut f.doc, Some(&f.nav), &tab());
        assert_eq!(f.doc.focused(), Some(f.close));
        f.doc.focus(&f.outside);
        trap.handle_tab_key(&mut f.doc, Some(&f.nav), &shift_tab());
        assert_eq!(f.doc.focused(), Some(f.b));
    }

    #[test]
    fn single_element_keeps_focus() {
        let mut doc = MockDocument::new();
        let body = doc.body();
        let nav = doc.append(body, ElementSpec::new("nav"));
        let only = doc.append(nav, ElementSpec::new("button"));
        doc.focus(&only);
        let trap = active_trap();
        assert_eq!(trap.handle_tab_key(&mut doc, Some(&nav), &tab()), TabOutcome::Wrapped);
        assert_eq!(trap.handle_tab_key(&mut doc, Some(&nav), &shift_tab()), TabOutcome::Wrapped);
        assert_eq!(doc.focused(), Some(only));
    }

    #[test]
    fn inactive_trap_and_other_keys_are_ignored() {
        let mut f = fixture();
        f.doc.focus(&f.b);
        let inactive = FocusTrap::new();
        assert_eq!(inactive.handle_tab_key(&mut f.doc, Some(&f.nav), &tab()), TabOutcome::Ignored);
        let trap = active_trap();
        let esc = KeyEvent::new(KeyCode::Escape);
        assert_eq!(trap.handle_tab_key(&mut f.doc, Some(&f.nav), &esc), TabOutcome::Ignored);
        let release = tab().with_kind(navdrawer_core::KeyEventKind::Release);
        assert_eq!(trap.handle_tab_key(&mut f.doc, Some(&f.nav), &release), TabOutcome::Ignored);
        assert_eq!(f.doc.focused(), Some(f.b));
    }

    #[test]
    fn empty_sequence_is_a_no_op() {
        let mut doc = MockDocument::new();
        let body = doc.body();
        let nav = doc.append(body, ElementSpec::new("nav"));
        doc.append(nav, ElementSpec::new("p"));
        let out = active_trap().handle_tab_key(&mut doc, Some(&nav), &tab());
        assert_eq!(out, TabOutcome::Ignored);
        assert_eq!(doc.focused(), None);
    }

    #[test]
    fn removed_node_is_not_restorable() {
        let mut f = fixture();
        assert!(is_restorable(&f.doc, &f.outside));
        f.doc.remove(f.outside);
        assert!(!is_restorable(&f.doc, &f.outside));
        assert!(!is_restorable(&f.doc, &f.doc.body()));
    }
}
