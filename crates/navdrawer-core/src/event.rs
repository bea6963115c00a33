#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! This module defines the event types the drawer consumes from its host.
//! Events are generic over the host's node handle `N` so pointer events can
//! carry their direct target without committing to a tree representation.
//!
//! # Design Notes
//!
//! - `Click` is an activation (the DOM `click`/`auxclick` pair); `PointerDown`
//!   is the raw press used for backdrop dismissal.
//! - `KeyEventKind` defaults to `Press` when the host cannot distinguish.
//! - `Modifiers` use bitflags for easy combination.

use bitflags::bitflags;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<N> {
    /// A keyboard event.
    Key(KeyEvent),

    /// A pointer press. Carries the direct target, not the listener node.
    PointerDown(PointerEvent<N>),

    /// An activation (click) on `target`.
    Click(PointerEvent<N>),

    /// The viewport was resized.
    Resize {
        /// New viewport width in CSS pixels.
        width: u32,
        /// New viewport height in CSS pixels.
        height: u32,
    },

    /// The location fragment changed.
    HashChange,

    /// The page finished loading.
    Load,
}

impl<N> Event<N> {
    /// Direct target of a pointer event, if any.
    #[must_use]
    pub fn target(&self) -> Option<&N> {
        match self {
            Self::PointerDown(p) | Self::Click(p) => Some(&p.target),
            _ => None,
        }
    }

    /// Short label for logs.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Key(_) => "key",
            Self::PointerDown(_) => "pointer_down",
            Self::Click(_) => "click",
            Self::Resize { .. } => "resize",
            Self::HashChange => "hash_change",
            Self::Load => "load",
        }
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// True for a press or auto-repeat.
    #[must_use]
    pub const fn is_press(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }
}

/// Key codes the drawer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Tab key. Shift+Tab arrives as `Tab` with [`Modifiers::SHIFT`].
    Tab,

    /// Any other named key.
    Other,
}

impl KeyCode {
    /// Map a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "Tab" => Self::Tab,
            "Escape" | "Esc" => Self::Escape,
            "Enter" => Self::Enter,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Other,
                }
            }
        }
    }
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// Pointer buttons, numbered as in `MouseEvent.button`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    /// Main button, usually the left button or a touch contact.
    #[default]
    Primary,
    /// Middle button / wheel click.
    Auxiliary,
    /// Usually the right button.
    Secondary,
    /// Back, forward and anything beyond.
    Other(u8),
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` index.
    #[must_use]
    pub const fn from_index(index: i16) -> Self {
        match index {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            n if n > 0 && n <= u8::MAX as i16 => Self::Other(n as u8),
            _ => Self::Other(u8::MAX),
        }
    }
}

/// A pointer event aimed at a node of the host tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerEvent<N> {
    /// The node the event was dispatched to (the innermost hit).
    pub target: N,

    /// The button involved.
    pub button: PointerButton,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl<N> PointerEvent<N> {
    /// Primary-button event on `target` without modifiers.
    #[must_use]
    pub const fn new(target: N) -> Self {
        Self {
            target,
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        }
    }

    /// Set the button.
    #[must_use]
    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    /// Set modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}
