#![forbid(unsafe_code)]

//! `wasm-bindgen` entry point.
//!
//! [`mount`] binds a [`Drawer`] to the live page, attaches the DOM listeners
//! and drives the scheduler from the browser's clocks: frame work runs on
//! `requestAnimationFrame`, timers on a single `setTimeout` re-armed for the
//! earliest deadline after every event.
//!
//! # Invariants
//!
//! - At most one `setTimeout` and one animation frame are outstanding.
//! - The `setTimeout` callback is a single closure allocated at mount and
//!   re-registered on every re-arm; it is dropped by `destroy`.
//! - The scheduler clock is brought up to `performance.now()` before every
//!   event, so delays are measured from the moment the event arrived.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use navdrawer::{Drawer, DrawerConfig, Event, EventOutcome, PointerButton, PointerEvent};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, EventTarget, KeyboardEvent, MouseEvent};

use crate::dom::WebDocument;
use crate::input::{Listened, host_time, key_event, modifiers, timeout_ms, viewport_dim};
use crate::timer::{TimerPlan, TimerSlot};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    fn performance_now() -> f64;

    #[wasm_bindgen(js_namespace = console, js_name = "error")]
    fn console_error(msg: &str);
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = match info.location() {
                Some(loc) => format!("panic at {}:{}: {info}", loc.file(), loc.line()),
                None => format!("panic: {info}"),
            };
            console_error(&msg);
        }));
    });
}

type Listener = Closure<dyn FnMut(web_sys::Event)>;
type TimerClosure = Closure<dyn FnMut()>;

struct Shared {
    drawer: RefCell<Drawer<WebDocument>>,
    timer: Cell<TimerSlot>,
    timer_callback: RefCell<Option<TimerClosure>>,
    frame_requested: Cell<bool>,
    listeners: RefCell<Vec<(EventTarget, &'static str, Listener)>>,
}

/// Handle to a mounted drawer.
#[wasm_bindgen]
pub struct DrawerHandle {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl DrawerHandle {
    /// Open the drawer.
    pub fn open(&self) -> bool {
        self.with_drawer(Drawer::open)
    }

    /// Close the drawer.
    pub fn close(&self) -> bool {
        self.with_drawer(Drawer::close)
    }

    /// Flip the drawer.
    pub fn toggle(&self) -> bool {
        self.with_drawer(Drawer::toggle)
    }

    /// Whether the drawer is open.
    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.shared
            .drawer
            .try_borrow()
            .is_ok_and(|drawer| drawer.is_open())
    }

    /// Detach every listener and cancel the pending timer.
    pub fn destroy(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut slot = self.shared.timer.get();
        if let Some(id) = slot.take() {
            window.clear_timeout_with_handle(id);
        }
        self.shared.timer.set(slot);
        // Breaks the closure's reference cycle back to `Shared`.
        drop(self.shared.timer_callback.borrow_mut().take());
        for (target, name, listener) in self.shared.listeners.borrow_mut().drain(..) {
            let _ = target
                .remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref());
        }
        tracing::info!(target: "navdrawer.web", "drawer unmounted");
    }
}

impl DrawerHandle {
    fn with_drawer(&self, f: impl FnOnce(&mut Drawer<WebDocument>) -> bool) -> bool {
        let changed = {
            let Ok(mut drawer) = self.shared.drawer.try_borrow_mut() else {
                return false;
            };
            drawer.tick(now());
            f(&mut drawer)
        };
        pump(&self.shared);
        changed
    }
}

/// Bind the drawer to the current page.
///
/// `config_json` is an optional JSON [`DrawerConfig`]; omitted fields take
/// their defaults.
#[wasm_bindgen]
pub fn mount(config_json: Option<String>) -> Result<DrawerHandle, JsValue> {
    install_panic_hook();

    let config = match config_json.as_deref() {
        Some(json) => DrawerConfig::from_json_str(json).map_err(to_js)?,
        None => DrawerConfig::default(),
    };
    let doc = WebDocument::new().map_err(to_js)?;
    let window = doc.window().clone();
    let document = doc.document().clone();
    let drawer = navdrawer::init(doc, config).map_err(to_js)?;
    let drawer_node = drawer.elements().drawer.clone();

    let shared = Rc::new(Shared {
        drawer: RefCell::new(drawer),
        timer: Cell::new(TimerSlot::new()),
        timer_callback: RefCell::new(None),
        frame_requested: Cell::new(false),
        listeners: RefCell::new(Vec::new()),
    });

    let timer = Rc::clone(&shared);
    let callback: TimerClosure = Closure::wrap(Box::new(move || {
        let mut slot = timer.timer.get();
        slot.fired();
        timer.timer.set(slot);
        if let Ok(mut drawer) = timer.drawer.try_borrow_mut() {
            drawer.tick(now());
        }
        pump(&timer);
    }) as Box<dyn FnMut()>);
    *shared.timer_callback.borrow_mut() = Some(callback);

    for kind in Listened::ALL {
        let target: &EventTarget = if kind.on_window() {
            window.as_ref()
        } else {
            document.as_ref()
        };
        listen(&shared, target, kind)?;
        if kind.contained_by_drawer()
            && let Some(node) = &drawer_node
        {
            listen(&shared, node, kind)?;
        }
    }

    if document.ready_state() == "complete" {
        dispatch(&shared, &Event::Load);
    }

    tracing::info!(target: "navdrawer.web", "drawer mounted");
    Ok(DrawerHandle { shared })
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn now() -> std::time::Duration {
    host_time(performance_now())
}

fn listen(shared: &Rc<Shared>, target: &EventTarget, kind: Listened) -> Result<(), JsValue> {
    let handler = Rc::clone(shared);
    let listener: Listener = Closure::new(move |event: web_sys::Event| {
        let Some(translated) = translate(&handler, kind, &event) else {
            return;
        };
        let outcome = dispatch(&handler, &translated);
        if outcome.prevent_default {
            event.prevent_default();
        }
        if outcome.stop_propagation {
            event.stop_propagation();
        }
    });
    target.add_event_listener_with_callback(kind.dom_name(), listener.as_ref().unchecked_ref())?;
    shared
        .listeners
        .borrow_mut()
        .push((target.clone(), kind.dom_name(), listener));
    Ok(())
}

fn target_element(event: &web_sys::Event) -> Option<Element> {
    let target = event.target()?;
    match target.dyn_into::<Element>() {
        Ok(element) => Some(element),
        Err(other) => other.dyn_into::<web_sys::Node>().ok()?.parent_element(),
    }
}

fn pointer(event: &web_sys::Event) -> Option<PointerEvent<Element>> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    let target = target_element(event)?;
    Some(
        PointerEvent::new(target)
            .with_button(PointerButton::from_index(mouse.button()))
            .with_modifiers(modifiers(
                mouse.shift_key(),
                mouse.alt_key(),
                mouse.ctrl_key(),
                mouse.meta_key(),
            )),
    )
}

fn translate(shared: &Shared, kind: Listened, event: &web_sys::Event) -> Option<Event<Element>> {
    match kind {
        Listened::Click | Listened::AuxClick => pointer(event).map(Event::Click),
        Listened::PointerDown => pointer(event).map(Event::PointerDown),
        Listened::KeyDown => {
            let key = event.dyn_ref::<KeyboardEvent>()?;
            let mods = modifiers(key.shift_key(), key.alt_key(), key.ctrl_key(), key.meta_key());
            Some(Event::Key(key_event(&key.key(), mods, key.repeat())))
        }
        Listened::Resize => {
            let drawer = shared.drawer.try_borrow().ok()?;
            let window = drawer.document().window();
            let width = window.inner_width().ok()?.as_f64().unwrap_or(0.0);
            let height = window.inner_height().ok()?.as_f64().unwrap_or(0.0);
            Some(Event::Resize {
                width: viewport_dim(width),
                height: viewport_dim(height),
            })
        }
        Listened::HashChange => Some(Event::HashChange),
        Listened::Load => Some(Event::Load),
    }
}

fn dispatch(shared: &Rc<Shared>, event: &Event<Element>) -> EventOutcome {
    let outcome = {
        let Ok(mut drawer) = shared.drawer.try_borrow_mut() else {
            tracing::warn!(
                target: "navdrawer.web",
                kind = event.kind_name(),
                "re-entrant event dropped"
            );
            return EventOutcome::IGNORED;
        };
        drawer.tick(now());
        drawer.handle_event(event)
    };
    pump(shared);
    outcome
}

/// Arm the animation frame and the timer for whatever the scheduler holds.
fn pump(shared: &Rc<Shared>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let (frame_work, deadline, clock) = match shared.drawer.try_borrow() {
        Ok(drawer) => (
            drawer.has_frame_work(),
            drawer.next_deadline(),
            drawer.scheduler().now(),
        ),
        Err(_) => return,
    };

    if frame_work && !shared.frame_requested.get() {
        let frame = Rc::clone(shared);
        let callback = Closure::once_into_js(move |_timestamp: f64| {
            frame.frame_requested.set(false);
            if let Ok(mut drawer) = frame.drawer.try_borrow_mut() {
                drawer.run_frame();
            }
            pump(&frame);
        });
        if window
            .request_animation_frame(callback.unchecked_ref())
            .is_ok()
        {
            shared.frame_requested.set(true);
        }
    }

    let mut slot = shared.timer.get();
    let cancel = match slot.plan(deadline) {
        TimerPlan::Keep => return,
        TimerPlan::Idle { cancel } | TimerPlan::Arm { cancel } => cancel,
    };
    if let Some(id) = cancel {
        window.clear_timeout_with_handle(id);
    }
    shared.timer.set(slot);
    let Some(deadline) = deadline else {
        return;
    };
    let callback = shared.timer_callback.borrow();
    let Some(callback) = callback.as_ref() else {
        return;
    };
    let delay = timeout_ms(clock.max(now()), deadline);
    match window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.as_ref().unchecked_ref(),
        delay,
    ) {
        Ok(id) => {
            slot.armed(id, deadline);
            shared.timer.set(slot);
        }
        Err(_) => tracing::warn!(target: "navdrawer.web", "setTimeout rejected"),
    }
}
