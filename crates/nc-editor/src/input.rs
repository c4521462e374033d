//! Input abstraction layer.
//!
//! Normalizes mouse, touch, and pen events into a unified `InputEvent` enum
//! consumed by the interaction controller. Each pointer carries its own
//! identifier so concurrent touches run independent gestures.

/// Identifier the host assigns to a pointer for the lifetime of a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub u32);

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };

    /// Platform command key: ⌘ on macOS, Ctrl elsewhere.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A normalized input event from any pointing device.
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start, pen contact).
    PointerDown {
        pointer: PointerId,
        x: f32,
        y: f32,
        modifiers: Modifiers,
    },

    PointerMove {
        pointer: PointerId,
        x: f32,
        y: f32,
        modifiers: Modifiers,
    },

    PointerUp {
        pointer: PointerId,
        x: f32,
        y: f32,
        modifiers: Modifiers,
    },

    /// The host lost the pointer (e.g. the OS took over a touch). Ends the
    /// gesture like `PointerUp`; nothing is rolled back.
    PointerCancel { pointer: PointerId },
}

impl InputEvent {
    pub fn from_pointer_down(pointer: u32, x: f32, y: f32, modifiers: Modifiers) -> Self {
        Self::PointerDown {
            pointer: PointerId(pointer),
            x,
            y,
            modifiers,
        }
    }

    pub fn from_pointer_move(pointer: u32, x: f32, y: f32, modifiers: Modifiers) -> Self {
        Self::PointerMove {
            pointer: PointerId(pointer),
            x,
            y,
            modifiers,
        }
    }

    pub fn from_pointer_up(pointer: u32, x: f32, y: f32, modifiers: Modifiers) -> Self {
        Self::PointerUp {
            pointer: PointerId(pointer),
            x,
            y,
            modifiers,
        }
    }

    pub fn from_pointer_cancel(pointer: u32) -> Self {
        Self::PointerCancel {
            pointer: PointerId(pointer),
        }
    }

    pub fn pointer(&self) -> PointerId {
        match self {
            Self::PointerDown { pointer, .. }
            | Self::PointerMove { pointer, .. }
            | Self::PointerUp { pointer, .. }
            | Self::PointerCancel { pointer } => *pointer,
        }
    }

    /// Extract position if the event carries one.
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y, .. } => Some((*x, *y)),
            Self::PointerCancel { .. } => None,
        }
    }
}

/// A key press as delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// `KeyboardEvent.key` value (e.g. `"z"`, `"Delete"`).
    pub key: String,
    pub modifiers: Modifiers,
    /// Whether a text field (prompt box, input, contenteditable) has focus.
    pub text_input_focused: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            text_input_focused: false,
        }
    }

    pub fn in_text_input(mut self) -> Self {
        self.text_input_focused = true;
        self
    }
}
