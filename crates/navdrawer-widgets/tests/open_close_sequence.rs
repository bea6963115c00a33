#![forbid(unsafe_code)]

//! Property tests: arbitrary open/close/toggle sequences keep the drawer's
//! derived state consistent with `DrawerState`.

use std::time::Duration;

use navdrawer_core::Document;
use navdrawer_harness::{MockDocument, standard_page};
use navdrawer_runtime::DrawerConfig;
use navdrawer_widgets::{Drawer, DrawerState};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Op {
    Open,
    Close,
    Toggle,
    Frame,
    Wait(u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Open),
        3 => Just(Op::Close),
        2 => Just(Op::Toggle),
        1 => Just(Op::Frame),
        1 => (0u64..300).prop_map(Op::Wait),
    ]
}

fn assert_consistent(d: &Drawer<MockDocument>) {
    let doc = d.document();
    let toggle = doc.id("menuToggle");
    let nav = doc.id("siteNav");
    let open = d.is_open();

    assert_eq!(doc.has_class(nav, "open"), open);
    assert_eq!(
        doc.attribute(toggle, "aria-expanded"),
        Some(if open { "true" } else { "false" })
    );
    assert_eq!(
        doc.attribute(nav, "aria-hidden"),
        Some(if open { "false" } else { "true" })
    );
    assert_eq!(doc.body_overflow(), if open { "hidden" } else { "" });
    if open {
        assert!(!doc.is_hidden(doc.id("backdrop")));
    }
}

proptest! {
    #[test]
    fn state_follows_last_state_changing_call(ops in proptest::collection::vec(op(), 0..40)) {
        let mut d = Drawer::new(standard_page(), DrawerConfig::default());
        let mut now = Duration::ZERO;
        let mut expected = DrawerState::Closed;

        for op in ops {
            match op {
                Op::Open => {
                    let changed = d.open();
                    prop_assert_eq!(changed, expected == DrawerState::Closed);
                    expected = DrawerState::Open;
                }
                Op::Close => {
                    let changed = d.close();
                    prop_assert_eq!(changed, expected == DrawerState::Open);
                    expected = DrawerState::Closed;
                }
                Op::Toggle => {
                    prop_assert!(d.toggle());
                    expected = if expected == DrawerState::Open {
                        DrawerState::Closed
                    } else {
                        DrawerState::Open
                    };
                }
                Op::Frame => d.run_frame(),
                Op::Wait(ms) => {
                    now += Duration::from_millis(ms);
                    d.tick(now);
                }
            }
            prop_assert_eq!(d.state(), expected);
            assert_consistent(&d);
        }
    }

    #[test]
    fn repeated_calls_have_no_additional_effect(repeats in 1usize..5, open_first in any::<bool>()) {
        let mut d = Drawer::new(standard_page(), DrawerConfig::default());
        if open_first {
            d.open();
        }
        let snapshot = d.document().clone();
        let pending = d.scheduler().pending();
        for _ in 0..repeats {
            let changed = if open_first { d.open() } else { d.close() };
            prop_assert!(!changed);
        }
        prop_assert_eq!(d.scheduler().pending(), pending);
        prop_assert_eq!(d.document().body_overflow(), snapshot.body_overflow());
        prop_assert_eq!(d.document().focused(), snapshot.focused());
    }

    #[test]
    fn backdrop_is_hidden_after_final_close_and_grace(ops in proptest::collection::vec(op(), 0..30)) {
        let mut d = Drawer::new(standard_page(), DrawerConfig::default());
        let mut now = Duration::ZERO;
        for op in ops {
            match op {
                Op::Open => { d.open(); }
                Op::Close => { d.close(); }
                Op::Toggle => { d.toggle(); }
                Op::Frame => d.run_frame(),
                Op::Wait(ms) => {
                    now += Duration::from_millis(ms);
                    d.tick(now);
                }
            }
        }
        d.close();
        d.run_frame();
        d.tick(now + Duration::from_millis(200));
        let backdrop = d.document().id("backdrop");
        prop_assert!(!d.document().has_class(backdrop, "show"));
        prop_assert!(d.document().is_hidden(backdrop));
    }
}
