#![forbid(unsafe_code)]

//! Pointer presses anywhere inside the drawer, however deeply nested, never
//! dismiss it and never reach document-level handlers.

use navdrawer_core::{Event, PointerEvent};
use navdrawer_harness::{ElementSpec, MockDocument, NodeId, standard_page};
use navdrawer_runtime::DrawerConfig;
use navdrawer_widgets::{Drawer, DrawerState};
use proptest::prelude::*;

const TAGS: [&str; 6] = ["div", "span", "ul", "li", "button", "svg"];

/// Append a chain of elements under the drawer. Each entry picks a tag and
/// the parent among the nodes created so far (0 is the drawer itself).
fn grow(doc: &mut MockDocument, shape: &[(usize, usize)]) -> Vec<NodeId> {
    let mut nodes = vec![doc.id("siteNav")];
    for &(parent, tag) in shape {
        let parent = nodes[parent % nodes.len()];
        let child = doc.append(parent, ElementSpec::new(TAGS[tag % TAGS.len()]));
        nodes.push(child);
    }
    nodes
}

proptest! {
    #[test]
    fn pointer_down_inside_drawer_is_contained(
        shape in proptest::collection::vec((0usize..32, 0usize..TAGS.len()), 0..24),
        picks in proptest::collection::vec(0usize..64, 1..8),
    ) {
        let mut doc = standard_page();
        let nodes = grow(&mut doc, &shape);
        let mut d = Drawer::new(doc, DrawerConfig::default());
        d.open();
        d.run_frame();

        for pick in picks {
            let target = nodes[pick % nodes.len()];
            let out = d.handle_event(&Event::PointerDown(PointerEvent::new(target)));
            prop_assert!(out.stop_propagation);
            prop_assert!(!out.prevent_default);
            prop_assert_eq!(d.state(), DrawerState::Open);
        }
    }

    #[test]
    fn pointer_down_outside_drawer_never_stops(pick in 0usize..4) {
        let mut d = Drawer::new(standard_page(), DrawerConfig::default());
        d.open();
        let target = {
            let doc = d.document();
            [doc.body(), doc.id("menuToggle"), doc.id("pricing"), doc.id("year")][pick]
        };
        let out = d.handle_event(&Event::PointerDown(PointerEvent::new(target)));
        prop_assert!(!out.stop_propagation);
        prop_assert!(d.is_open());
    }
}
