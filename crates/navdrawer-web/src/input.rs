#![forbid(unsafe_code)]

//! Browser value mapping.
//!
//! Pure conversions from raw DOM values (key names, button indices, modifier
//! flags, attribute strings, `performance.now()` timestamps) into navdrawer
//! types. Kept free of `web-sys` so it builds and tests on any target.

use std::time::Duration;

use navdrawer::{KeyCode, KeyEvent, KeyEventKind, Modifiers};

/// DOM events the binding listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listened {
    /// `click`
    Click,
    /// `auxclick` (middle button activations)
    AuxClick,
    /// `pointerdown`
    PointerDown,
    /// `keydown`
    KeyDown,
    /// `resize`, on the window
    Resize,
    /// `hashchange`, on the window
    HashChange,
    /// `load`, on the window
    Load,
}

impl Listened {
    /// Every listened event.
    pub const ALL: [Self; 7] = [
        Self::Click,
        Self::AuxClick,
        Self::PointerDown,
        Self::KeyDown,
        Self::Resize,
        Self::HashChange,
        Self::Load,
    ];

    /// DOM event type string.
    #[must_use]
    pub const fn dom_name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::AuxClick => "auxclick",
            Self::PointerDown => "pointerdown",
            Self::KeyDown => "keydown",
            Self::Resize => "resize",
            Self::HashChange => "hashchange",
            Self::Load => "load",
        }
    }

    /// Whether the event is dispatched on the window rather than the
    /// document tree.
    #[must_use]
    pub const fn on_window(self) -> bool {
        matches!(self, Self::Resize | Self::HashChange | Self::Load)
    }

    /// Whether the drawer container also gets its own listener so that
    /// stopping propagation there keeps the event from reaching document
    /// handlers.
    #[must_use]
    pub const fn contained_by_drawer(self) -> bool {
        matches!(self, Self::Click | Self::AuxClick | Self::PointerDown)
    }
}

/// Modifier set from the four `*Key` flags of a DOM mouse or keyboard event.
#[must_use]
pub fn modifiers(shift: bool, alt: bool, ctrl: bool, meta: bool) -> Modifiers {
    let mut mods = Modifiers::NONE;
    mods.set(Modifiers::SHIFT, shift);
    mods.set(Modifiers::ALT, alt);
    mods.set(Modifiers::CTRL, ctrl);
    mods.set(Modifiers::SUPER, meta);
    mods
}

/// Key event from `KeyboardEvent.key`, its modifiers and `repeat` flag.
#[must_use]
pub fn key_event(key: &str, mods: Modifiers, repeat: bool) -> KeyEvent {
    let kind = if repeat {
        KeyEventKind::Repeat
    } else {
        KeyEventKind::Press
    };
    KeyEvent::new(KeyCode::from_key_name(key))
        .with_modifiers(mods)
        .with_kind(kind)
}

/// Parse a `tabindex` attribute the way HTML does: optional whitespace, an
/// optional sign, then digits. Anything else means "not set".
#[must_use]
pub fn parse_tab_index(raw: Option<&str>) -> Option<i32> {
    let raw = raw?.trim();
    let (negative, digits) = match raw.as_bytes().first()? {
        b'-' => (true, &raw[1..]),
        b'+' => (false, &raw[1..]),
        _ => (false, raw),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value: i64 = digits[..end].parse().ok()?;
    let value = if negative { -value } else { value };
    i32::try_from(value).ok()
}

/// Whether a `contenteditable` attribute value makes the element editable.
#[must_use]
pub fn is_content_editable(raw: Option<&str>) -> bool {
    match raw {
        None => false,
        Some(value) => {
            let value = value.trim();
            value.is_empty()
                || value.eq_ignore_ascii_case("true")
                || value.eq_ignore_ascii_case("plaintext-only")
        }
    }
}

/// Convert a `performance.now()` reading (milliseconds) to a monotonic
/// duration. Non-finite or negative readings clamp to zero.
#[must_use]
pub fn host_time(ms: f64) -> Duration {
    if ms.is_finite() && ms > 0.0 {
        Duration::from_secs_f64(ms / 1000.0)
    } else {
        Duration::ZERO
    }
}

/// `setTimeout` delay in whole milliseconds until `deadline`, rounded up so
/// the timer never fires before the task is due.
#[must_use]
pub fn timeout_ms(now: Duration, deadline: Duration) -> i32 {
    let remaining = deadline.saturating_sub(now);
    let micros = remaining.as_micros();
    let ms = micros.div_ceil(1000);
    i32::try_from(ms).unwrap_or(i32::MAX)
}

/// Clamp a viewport dimension reported as `f64` into `u32`.
#[must_use]
pub fn viewport_dim(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}
